// SPDX-License-Identifier: MPL-2.0
//! Scatterplot component: dataset points plus an optional fitted line.

use crate::dataset::CarSample;
use crate::ui::design_tokens::{palette, sizing, typography};
use iced::widget::canvas;
use iced::{mouse, Element, Length, Point, Rectangle, Theme};

/// Margin between the canvas edge and the plotted area, in pixels.
const CHART_MARGIN: f32 = 32.0;

/// Maps data coordinates onto a screen rectangle (y axis flipped).
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChartScale {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl ChartScale {
    /// Fits the scale over the points and any line endpoints.
    ///
    /// Returns `None` when there is nothing to plot or the data spans a
    /// single point in either axis.
    fn fit(points: &[CarSample], line: Option<[(f64, f64); 2]>) -> Option<Self> {
        let mut xs: Vec<f64> = points.iter().map(|p| p.horsepower).collect();
        let mut ys: Vec<f64> = points.iter().map(|p| p.mpg).collect();
        if let Some(endpoints) = line {
            for (x, y) in endpoints {
                xs.push(x);
                ys.push(y);
            }
        }

        let (x_min, x_max) = min_max(&xs)?;
        let (y_min, y_max) = min_max(&ys)?;
        if x_min == x_max || y_min == y_max {
            return None;
        }

        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    fn to_screen(&self, x: f64, y: f64, area: Rectangle) -> Point {
        let fx = ((x - self.x_min) / (self.x_max - self.x_min)) as f32;
        let fy = ((y - self.y_min) / (self.y_max - self.y_min)) as f32;
        Point::new(
            area.x + fx * area.width,
            // Screen y grows downward; data y grows upward.
            area.y + (1.0 - fy) * area.height,
        )
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for value in iter {
        min = min.min(value);
        max = max.max(value);
    }
    Some((min, max))
}

/// Scatterplot widget over borrowed dataset samples.
#[derive(Debug, Clone, Copy)]
pub struct Scatterplot<'a> {
    points: &'a [CarSample],
    line: Option<[(f64, f64); 2]>,
    x_label: &'a str,
    y_label: &'a str,
}

impl<'a> Scatterplot<'a> {
    pub fn new(points: &'a [CarSample], line: Option<[(f64, f64); 2]>) -> Self {
        Self {
            points,
            line,
            x_label: "Horsepower",
            y_label: "MPG",
        }
    }
}

impl<Message> canvas::Program<Message> for Scatterplot<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let area = Rectangle {
            x: CHART_MARGIN,
            y: CHART_MARGIN / 2.0,
            width: (bounds.width - 1.5 * CHART_MARGIN).max(1.0),
            height: (bounds.height - 1.5 * CHART_MARGIN).max(1.0),
        };

        let Some(scale) = ChartScale::fit(self.points, self.line) else {
            return vec![frame.into_geometry()];
        };

        // Axes
        let origin = Point::new(area.x, area.y + area.height);
        let x_axis = canvas::Path::line(origin, Point::new(area.x + area.width, origin.y));
        let y_axis = canvas::Path::line(origin, Point::new(area.x, area.y));
        let axis_stroke = canvas::Stroke::default()
            .with_color(palette::AXIS)
            .with_width(1.0);
        frame.stroke(&x_axis, axis_stroke);
        frame.stroke(&y_axis, axis_stroke);

        frame.fill_text(canvas::Text {
            content: self.x_label.to_string(),
            position: Point::new(area.x + area.width / 2.0, origin.y + 8.0),
            color: palette::AXIS,
            size: typography::CAPTION.into(),
            ..canvas::Text::default()
        });
        frame.fill_text(canvas::Text {
            content: self.y_label.to_string(),
            position: Point::new(4.0, area.y),
            color: palette::AXIS,
            size: typography::CAPTION.into(),
            ..canvas::Text::default()
        });

        // Dataset points
        for sample in self.points {
            let center = scale.to_screen(sample.horsepower, sample.mpg, area);
            let dot = canvas::Path::circle(center, sizing::POINT_RADIUS);
            frame.fill(&dot, palette::POINT);
        }

        // Fitted line on top
        if let Some([(x0, y0), (x1, y1)]) = self.line {
            let path = canvas::Path::line(
                scale.to_screen(x0, y0, area),
                scale.to_screen(x1, y1, area),
            );
            frame.stroke(
                &path,
                canvas::Stroke::default()
                    .with_color(palette::FIT_LINE)
                    .with_width(2.0),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Builds the canvas element for the regression screen.
pub fn view<'a, Message: 'a>(
    points: &'a [CarSample],
    line: Option<[(f64, f64); 2]>,
) -> Element<'a, Message> {
    canvas::Canvas::new(Scatterplot::new(points, line))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::CHART_HEIGHT))
        .into()
}
