// SPDX-License-Identifier: MPL-2.0
//! Reusable UI components shared across multiple screens.
//!
//! # Components
//!
//! - [`scatterplot`] - Canvas-based scatterplot with an optional fitted line,
//!   used by the regression screen

pub mod scatterplot;
