// SPDX-License-Identifier: MPL-2.0
//! `gesture_lens` is a small desktop app built with the Iced GUI framework.
//!
//! It pairs a gesture-label state container (a reducer with a replayable
//! action log) with a linear-regression playground trained on a public car
//! dataset, plus user preference management and modular UI design.

#![doc(html_root_url = "https://docs.rs/gesture_lens/0.1.0")]

pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod gestures;
pub mod regression;
pub mod store;
pub mod ui;
