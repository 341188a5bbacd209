// SPDX-License-Identifier: MPL-2.0
//! Settings screen: theme mode, dataset URL, and training epochs.
//!
//! Committed changes are reported to the parent through [`Event`]s so the
//! app can persist them; the screen itself never touches the config file.

use crate::config::DEFAULT_EPOCHS;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::theming::ThemeMode;
use iced::{
    widget::{button, text_input, Button, Column, Row, Text},
    Element, Length,
};

pub const EPOCHS_INVALID: &str = "Epochs must be a whole number";
pub const EPOCHS_RANGE: &str = "Epochs must be between 1 and 100000";

pub const MIN_EPOCHS: u32 = 1;
pub const MAX_EPOCHS: u32 = 100_000;

/// Initial values handed in from the persisted config.
#[derive(Debug, Clone)]
pub struct StateConfig {
    pub theme_mode: ThemeMode,
    pub dataset_url: String,
    pub epochs: u32,
}

/// Settings screen state.
#[derive(Debug, Clone)]
pub struct State {
    theme_mode: ThemeMode,
    dataset_url_input: String,
    epochs_input: String,
    epochs_error: Option<&'static str>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::System,
            dataset_url_input: crate::dataset::CARS_DATASET_URL.to_string(),
            epochs_input: DEFAULT_EPOCHS.to_string(),
            epochs_error: None,
        }
    }
}

/// Messages handled by the settings screen.
#[derive(Debug, Clone)]
pub enum Message {
    ThemeModeSelected(ThemeMode),
    DatasetUrlChanged(String),
    DatasetUrlSubmitted,
    EpochsInputChanged(String),
    EpochsSubmitted,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    ThemeModeSelected(ThemeMode),
    DatasetUrlChanged(String),
    EpochsChanged(u32),
}

impl State {
    pub fn new(config: StateConfig) -> Self {
        Self {
            theme_mode: config.theme_mode,
            dataset_url_input: config.dataset_url,
            epochs_input: config.epochs.to_string(),
            epochs_error: None,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    #[cfg(test)]
    pub(crate) fn epochs_error(&self) -> Option<&'static str> {
        self.epochs_error
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ThemeModeSelected(mode) => {
                self.theme_mode = mode;
                Event::ThemeModeSelected(mode)
            }
            Message::DatasetUrlChanged(value) => {
                self.dataset_url_input = value;
                Event::None
            }
            Message::DatasetUrlSubmitted => {
                Event::DatasetUrlChanged(self.dataset_url_input.trim().to_string())
            }
            Message::EpochsInputChanged(value) => {
                self.epochs_input = value;
                self.epochs_error = None;
                Event::None
            }
            Message::EpochsSubmitted => match self.epochs_input.trim().parse::<u32>() {
                Ok(value) if (MIN_EPOCHS..=MAX_EPOCHS).contains(&value) => {
                    self.epochs_error = None;
                    Event::EpochsChanged(value)
                }
                Ok(_) => {
                    self.epochs_error = Some(EPOCHS_RANGE);
                    Event::None
                }
                Err(_) => {
                    self.epochs_error = Some(EPOCHS_INVALID);
                    Event::None
                }
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = Text::new("Settings").size(typography::TITLE);

        let mut theme_row = Row::new()
            .spacing(spacing::SM)
            .push(Text::new("Theme").size(typography::BODY));
        for mode in ThemeMode::ALL {
            let styled = if mode == self.theme_mode {
                Button::new(Text::new(mode.label())).style(button::primary)
            } else {
                Button::new(Text::new(mode.label())).style(button::secondary)
            };
            theme_row = theme_row.push(styled.on_press(Message::ThemeModeSelected(mode)));
        }

        let url_row = Row::new()
            .spacing(spacing::SM)
            .push(Text::new("Dataset URL").size(typography::BODY))
            .push(
                text_input("https://…", &self.dataset_url_input)
                    .on_input(Message::DatasetUrlChanged)
                    .on_submit(Message::DatasetUrlSubmitted)
                    .width(Length::Fixed(sizing::INPUT_WIDTH)),
            )
            .push(Button::new(Text::new("Apply")).on_press(Message::DatasetUrlSubmitted));

        let mut epochs_row = Row::new()
            .spacing(spacing::SM)
            .push(Text::new("Training epochs").size(typography::BODY))
            .push(
                text_input(&DEFAULT_EPOCHS.to_string(), &self.epochs_input)
                    .on_input(Message::EpochsInputChanged)
                    .on_submit(Message::EpochsSubmitted)
                    .width(Length::Fixed(sizing::INPUT_WIDTH / 2.0)),
            )
            .push(Button::new(Text::new("Apply")).on_press(Message::EpochsSubmitted));
        if let Some(error) = self.epochs_error {
            epochs_row = epochs_row.push(
                Text::new(error)
                    .size(typography::CAPTION)
                    .color(palette::ERROR_500),
            );
        }

        Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(title)
            .push(theme_row)
            .push(url_row)
            .push(epochs_row)
            .into()
    }
}
