// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based
//! architecture with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`gestures`] - Gesture store front-end: dispatch, history, replay
//! - [`regression`] - Dataset fetch, toy training, and prediction
//! - [`settings`] - Application preferences
//!
//! # Shared Infrastructure
//!
//! - [`components`] - Reusable UI components (scatterplot)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`navbar`] - Screen-switcher bar

pub mod components;
pub mod design_tokens;
pub mod gestures;
pub mod navbar;
pub mod regression;
pub mod settings;
pub mod theming;
