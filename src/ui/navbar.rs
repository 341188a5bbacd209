// SPDX-License-Identifier: MPL-2.0
//! Navigation bar for app-level screen switching.
//!
//! A row of buttons, one per screen, with the active screen highlighted.

use crate::app::Screen;
use crate::ui::design_tokens::spacing;
use iced::{
    alignment::Vertical,
    widget::{button, Button, Container, Row, Text},
    Element, Length,
};

/// Messages emitted by the navbar.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    OpenGestures,
    OpenRegression,
    OpenSettings,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SwitchScreen(Screen),
}

/// Maps a navbar message to the screen-switch event.
pub fn update(message: Message) -> Event {
    match message {
        Message::OpenGestures => Event::SwitchScreen(Screen::Gestures),
        Message::OpenRegression => Event::SwitchScreen(Screen::Regression),
        Message::OpenSettings => Event::SwitchScreen(Screen::Settings),
    }
}

/// Render the navigation bar.
pub fn view<'a>(current: Screen) -> Element<'a, Message> {
    let row = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .push(nav_button(
            "Gestures",
            Screen::Gestures,
            current,
            Message::OpenGestures,
        ))
        .push(nav_button(
            "Regression",
            Screen::Regression,
            current,
            Message::OpenRegression,
        ))
        .push(nav_button(
            "Settings",
            Screen::Settings,
            current,
            Message::OpenSettings,
        ));

    Container::new(row).width(Length::Fill).into()
}

fn nav_button<'a>(
    label: &'a str,
    target: Screen,
    current: Screen,
    message: Message,
) -> Button<'a, Message> {
    let styled = if target == current {
        Button::new(Text::new(label)).style(button::primary)
    } else {
        Button::new(Text::new(label)).style(button::secondary)
    };
    styled.on_press(message)
}
