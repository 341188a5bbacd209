// SPDX-License-Identifier: MPL-2.0
//! Gestures screen: interactive front-end to the gesture store.
//!
//! The screen owns the store. Besides the two well-formed action buttons it
//! accepts raw JSON actions, which exercises the same deserialization path a
//! persisted dispatch log goes through: malformed JSON is reported, unknown
//! tags dispatch as no-ops.

use crate::gestures::{
    eye_detected, reduce, single_hand_detected, GestureAction, GestureState,
};
use crate::store::Store;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use iced::{
    widget::{button, text_input, Button, Column, Row, Text},
    Element, Length,
};

/// How many log entries the history list shows, newest first.
const HISTORY_LIMIT: usize = 12;

/// Gestures screen state.
#[derive(Debug)]
pub struct State {
    store: Store<GestureState, GestureAction>,
    raw_action_input: String,
    raw_action_error: Option<String>,
    /// Whether the most recent dispatch changed the state.
    last_dispatch_changed: Option<bool>,
    /// Outcome of the last replay check: replayed state equals live state.
    replay_matched: Option<bool>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages handled by the gestures screen.
#[derive(Debug, Clone)]
pub enum Message {
    SingleHandPressed,
    EyePressed,
    RawActionInputChanged(String),
    RawActionSubmitted,
    ReplayPressed,
    ResetPressed,
}

impl State {
    pub fn new() -> Self {
        Self {
            store: Store::new(reduce),
            raw_action_input: String::new(),
            raw_action_error: None,
            last_dispatch_changed: None,
            replay_matched: None,
        }
    }

    /// Current label, as held by the store.
    pub fn label(&self) -> &str {
        &self.store.state().label
    }

    /// Number of dispatched actions in the log.
    pub fn history_len(&self) -> usize {
        self.store.log().len()
    }

    #[cfg(test)]
    pub(crate) fn replay_matched(&self) -> Option<bool> {
        self.replay_matched
    }

    #[cfg(test)]
    pub(crate) fn raw_action_error(&self) -> Option<&str> {
        self.raw_action_error.as_deref()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::SingleHandPressed => self.dispatch(single_hand_detected()),
            Message::EyePressed => self.dispatch(eye_detected()),
            Message::RawActionInputChanged(value) => {
                self.raw_action_input = value;
                self.raw_action_error = None;
            }
            Message::RawActionSubmitted => match serde_json::from_str(&self.raw_action_input) {
                Ok(action) => {
                    self.dispatch(action);
                    self.raw_action_input.clear();
                }
                Err(err) => {
                    self.raw_action_error = Some(err.to_string());
                }
            },
            Message::ReplayPressed => {
                self.replay_matched = Some(&self.store.replay() == self.store.state());
            }
            Message::ResetPressed => {
                self.store = Store::new(reduce);
                self.last_dispatch_changed = None;
                self.replay_matched = None;
            }
        }
    }

    fn dispatch(&mut self, action: GestureAction) {
        self.last_dispatch_changed = Some(self.store.dispatch(action));
        self.raw_action_error = None;
        self.replay_matched = None;
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = Text::new("Gestures").size(typography::TITLE);

        let label = self.store.state().label.as_str();
        let current = Row::new()
            .spacing(spacing::XS)
            .push(Text::new("Current gesture:").size(typography::SUBTITLE))
            .push(
                Text::new(if label.is_empty() { "(none)" } else { label })
                    .size(typography::SUBTITLE)
                    .color(palette::PRIMARY_500),
            );

        let dispatch_row = Row::new()
            .spacing(spacing::SM)
            .push(action_button("Single hand detected", Message::SingleHandPressed))
            .push(action_button("Eye detected", Message::EyePressed))
            .push(Button::new(Text::new("Reset store")).on_press(Message::ResetPressed));

        let raw_input = text_input(r#"{ "type": "eye-detected" }"#, &self.raw_action_input)
            .on_input(Message::RawActionInputChanged)
            .on_submit(Message::RawActionSubmitted)
            .width(Length::Fixed(sizing::INPUT_WIDTH));
        let mut raw_row = Row::new()
            .spacing(spacing::SM)
            .push(raw_input)
            .push(Button::new(Text::new("Dispatch raw")).on_press(Message::RawActionSubmitted));
        if let Some(error) = &self.raw_action_error {
            raw_row = raw_row.push(
                Text::new(error.clone())
                    .size(typography::CAPTION)
                    .color(palette::ERROR_500),
            );
        }

        let mut replay_row = Row::new().spacing(spacing::SM).push(
            Button::new(Text::new("Replay log")).on_press(Message::ReplayPressed),
        );
        replay_row = match self.replay_matched {
            Some(true) => replay_row.push(
                Text::new("Replayed state matches the live state")
                    .size(typography::CAPTION)
                    .color(palette::SUCCESS_500),
            ),
            Some(false) => replay_row.push(
                Text::new("Replayed state diverged from the live state")
                    .size(typography::CAPTION)
                    .color(palette::ERROR_500),
            ),
            None => replay_row,
        };

        let mut history = Column::new()
            .spacing(spacing::XXS)
            .push(Text::new("Dispatch history").size(typography::BODY));
        if self.store.log().is_empty() {
            history = history.push(
                Text::new("Nothing dispatched yet").size(typography::CAPTION),
            );
        }
        for record in self.store.log().iter().rev().take(HISTORY_LIMIT) {
            let line = format!(
                "{}  {}",
                record.at.format("%H:%M:%S"),
                record.action.tag()
            );
            history = history.push(Text::new(line).size(typography::CAPTION));
        }

        let mut column = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(title)
            .push(current)
            .push(dispatch_row)
            .push(raw_row)
            .push(replay_row)
            .push(history);

        if let Some(changed) = self.last_dispatch_changed {
            let notice = if changed {
                "Last dispatch replaced the state"
            } else {
                "Last dispatch was a no-op (unrecognized action)"
            };
            column = column.push(Text::new(notice).size(typography::CAPTION));
        }

        column.into()
    }
}

fn action_button(label: &str, message: Message) -> Button<'_, Message> {
    Button::new(Text::new(label))
        .style(button::primary)
        .on_press(message)
}
