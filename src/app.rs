// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the three screens.
//!
//! The `App` struct wires together the screens (gestures, regression,
//! settings) and translates settings events into config persistence. Policy
//! decisions (window sizing, persistence format, theme mapping) stay close
//! to the main update loop so user-facing behavior is easy to audit.

use crate::config;
use crate::dataset::CARS_DATASET_URL;
use crate::ui::gestures as gestures_screen;
use crate::ui::navbar;
use crate::ui::regression as regression_screen;
use crate::ui::settings::{self, Event as SettingsEvent, StateConfig as SettingsConfig};
use crate::ui::theming::ThemeMode;
use iced::{
    widget::{Column, Container},
    window, Element, Length, Task, Theme,
};

/// Root Iced application state bridging the screens and persisted
/// preferences.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    gestures: gestures_screen::State,
    regression: regression_screen::State,
    settings: settings::State,
    theme_mode: ThemeMode,
    dataset_url: String,
    epochs: u32,
}

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Gestures,
    Regression,
    Settings,
}

/// Top-level messages consumed by [`App::update`]. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Gestures(gestures_screen::Message),
    Regression(regression_screen::Message),
    Settings(settings::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional dataset URL override, taking precedence over the config.
    pub dataset_url: Option<String>,
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 550;
pub const MIN_WINDOW_WIDTH: u32 = 650;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(move || App::new(flags.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Gestures,
            gestures: gestures_screen::State::new(),
            regression: regression_screen::State::new(),
            settings: settings::State::default(),
            theme_mode: ThemeMode::System,
            dataset_url: CARS_DATASET_URL.to_string(),
            epochs: config::DEFAULT_EPOCHS,
        }
    }
}

impl App {
    /// Initializes application state from persisted preferences and CLI
    /// flags.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();

        let dataset_url = flags
            .dataset_url
            .or(config.dataset_url)
            .unwrap_or_else(|| CARS_DATASET_URL.to_string());
        let epochs = config.epochs.unwrap_or(config::DEFAULT_EPOCHS);

        let app = App {
            theme_mode: config.theme_mode,
            settings: settings::State::new(SettingsConfig {
                theme_mode: config.theme_mode,
                dataset_url: dataset_url.clone(),
                epochs,
            }),
            dataset_url,
            epochs,
            ..Self::default()
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        String::from("GestureLens")
    }

    fn theme(&self) -> Theme {
        if self.theme_mode.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navbar(navbar_message) => {
                let navbar::Event::SwitchScreen(target) = navbar::update(navbar_message);
                self.screen = target;
                Task::none()
            }
            Message::Gestures(gestures_message) => {
                self.gestures.update(gestures_message);
                Task::none()
            }
            Message::Regression(regression_message) => self
                .regression
                .update(regression_message, &self.dataset_url, self.epochs)
                .map(Message::Regression),
            Message::Settings(settings_message) => {
                self.handle_settings_message(settings_message)
            }
        }
    }

    fn handle_settings_message(&mut self, message: settings::Message) -> Task<Message> {
        match self.settings.update(message) {
            SettingsEvent::None => Task::none(),
            SettingsEvent::ThemeModeSelected(mode) => {
                self.theme_mode = mode;
                self.persist_preferences()
            }
            SettingsEvent::DatasetUrlChanged(url) => {
                self.dataset_url = url;
                self.persist_preferences()
            }
            SettingsEvent::EpochsChanged(epochs) => {
                self.epochs = epochs;
                self.persist_preferences()
            }
        }
    }

    /// Persists the current preferences to disk.
    ///
    /// Guarded during tests to keep isolation: unit tests exercise the logic
    /// by calling the function directly rather than through events.
    fn persist_preferences(&self) -> Task<Message> {
        if cfg!(test) {
            return Task::none();
        }

        let cfg = config::Config {
            theme_mode: self.theme_mode,
            dataset_url: Some(self.dataset_url.clone()),
            epochs: Some(self.epochs),
        };

        if let Err(error) = config::save(&cfg) {
            eprintln!("Failed to save config: {:?}", error);
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let bar = navbar::view(self.screen).map(Message::Navbar);

        let content: Element<'_, Message> = match self.screen {
            Screen::Gestures => self.gestures.view().map(Message::Gestures),
            Screen::Regression => self.regression.view().map(Message::Regression),
            Screen::Settings => self.settings.view().map(Message::Settings),
        };

        let column = Column::new().push(bar).push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        );

        Container::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::{EYE_GESTURE, SINGLE_HAND_GESTURE};
    use std::fs;
    use std::sync::{Mutex, OnceLock};
    use tempfile::tempdir;

    fn config_env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn with_temp_config_dir<F>(test: F)
    where
        F: FnOnce(&std::path::Path),
    {
        let _guard = config_env_lock().lock().expect("failed to lock mutex");
        let temp_dir = tempdir().expect("failed to create temp dir");
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

        test(temp_dir.path());

        if let Some(value) = previous {
            std::env::set_var("XDG_CONFIG_HOME", value);
        } else {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    fn new_starts_on_the_gestures_screen() {
        with_temp_config_dir(|_| {
            let (app, _task) = App::new(Flags { dataset_url: None });
            assert_eq!(app.screen, Screen::Gestures);
            assert_eq!(app.gestures.label(), "");
            assert_eq!(app.epochs, config::DEFAULT_EPOCHS);
        });
    }

    #[test]
    fn cli_dataset_url_overrides_the_config() {
        with_temp_config_dir(|config_root| {
            let settings_dir = config_root.join("GestureLens");
            fs::create_dir_all(&settings_dir).expect("dir");
            fs::write(
                settings_dir.join("settings.toml"),
                "dataset_url = \"https://config.example/cars.json\"\n",
            )
            .expect("write config");

            let (app, _task) = App::new(Flags {
                dataset_url: Some("https://flag.example/cars.json".to_string()),
            });
            assert_eq!(app.dataset_url, "https://flag.example/cars.json");
        });
    }

    #[test]
    fn config_dataset_url_is_used_without_a_flag() {
        with_temp_config_dir(|config_root| {
            let settings_dir = config_root.join("GestureLens");
            fs::create_dir_all(&settings_dir).expect("dir");
            fs::write(
                settings_dir.join("settings.toml"),
                "dataset_url = \"https://config.example/cars.json\"\n",
            )
            .expect("write config");

            let (app, _task) = App::new(Flags { dataset_url: None });
            assert_eq!(app.dataset_url, "https://config.example/cars.json");
        });
    }

    #[test]
    fn navbar_messages_switch_screens() {
        let mut app = App::default();

        let _ = app.update(Message::Navbar(navbar::Message::OpenRegression));
        assert_eq!(app.screen, Screen::Regression);

        let _ = app.update(Message::Navbar(navbar::Message::OpenSettings));
        assert_eq!(app.screen, Screen::Settings);

        let _ = app.update(Message::Navbar(navbar::Message::OpenGestures));
        assert_eq!(app.screen, Screen::Gestures);
    }

    #[test]
    fn gesture_dispatch_flows_through_the_app_update() {
        let mut app = App::default();

        let _ = app.update(Message::Gestures(gestures_screen::Message::SingleHandPressed));
        assert_eq!(app.gestures.label(), SINGLE_HAND_GESTURE);

        let _ = app.update(Message::Gestures(gestures_screen::Message::EyePressed));
        assert_eq!(app.gestures.label(), EYE_GESTURE);
    }

    #[test]
    fn committed_epochs_reach_the_app_state() {
        let mut app = App::default();

        let _ = app.update(Message::Settings(settings::Message::EpochsInputChanged(
            "750".to_string(),
        )));
        let _ = app.update(Message::Settings(settings::Message::EpochsSubmitted));

        assert_eq!(app.epochs, 750);
    }

    #[test]
    fn invalid_epochs_leave_the_app_state_unchanged() {
        let mut app = App::default();

        let _ = app.update(Message::Settings(settings::Message::EpochsInputChanged(
            "not-a-number".to_string(),
        )));
        let _ = app.update(Message::Settings(settings::Message::EpochsSubmitted));

        assert_eq!(app.epochs, config::DEFAULT_EPOCHS);
    }

    #[test]
    fn theme_selection_updates_the_effective_theme() {
        let mut app = App::default();

        let _ = app.update(Message::Settings(settings::Message::ThemeModeSelected(
            ThemeMode::Light,
        )));
        assert_eq!(app.theme_mode, ThemeMode::Light);
        assert_eq!(app.theme(), Theme::Light);

        let _ = app.update(Message::Settings(settings::Message::ThemeModeSelected(
            ThemeMode::Dark,
        )));
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn committed_dataset_url_reaches_the_app_state() {
        let mut app = App::default();

        let _ = app.update(Message::Settings(settings::Message::DatasetUrlChanged(
            "https://mirror.example/cars.json".to_string(),
        )));
        let _ = app.update(Message::Settings(settings::Message::DatasetUrlSubmitted));

        assert_eq!(app.dataset_url, "https://mirror.example/cars.json");
    }

    #[test]
    fn view_renders_every_screen() {
        let mut app = App::default();
        for target in [Screen::Gestures, Screen::Regression, Screen::Settings] {
            app.screen = target;
            let _element = app.view();
        }
    }
}
