// SPDX-License-Identifier: MPL-2.0
//! Centralized design tokens: palette, spacing, sizing, typography, radii.
//!
//! Tokens are designed to be consistent; keep the spacing scale on the 8px
//! grid when adding entries.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    // Brand colors (blue scale)
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);

    // Chart colors
    pub const POINT: Color = PRIMARY_400;
    pub const FIT_LINE: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const AXIS: Color = GRAY_400;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Width of text inputs on the settings and regression screens.
    pub const INPUT_WIDTH: f32 = 260.0;
    /// Height reserved for the scatterplot canvas.
    pub const CHART_HEIGHT: f32 = 300.0;
    /// Radius of a plotted dataset point.
    pub const POINT_RADIUS: f32 = 2.5;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const TITLE: f32 = 30.0;
    pub const SUBTITLE: f32 = 20.0;
    pub const BODY: f32 = 16.0;
    pub const CAPTION: f32 = 13.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_monotonic() {
        assert!(spacing::XXS < spacing::XS);
        assert!(spacing::XS < spacing::SM);
        assert!(spacing::SM < spacing::MD);
        assert!(spacing::MD < spacing::LG);
    }

    #[test]
    fn chart_colors_are_distinct() {
        assert_ne!(palette::POINT, palette::FIT_LINE);
        assert_ne!(palette::POINT, palette::AXIS);
    }
}
