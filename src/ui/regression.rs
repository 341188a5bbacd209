// SPDX-License-Identifier: MPL-2.0
//! Regression screen: fetch the cars dataset, train the toy model, predict.
//!
//! Fetching and training both run off the update loop via [`Task::perform`];
//! the screen tracks coarse statuses so the view can disable buttons and
//! report failures inline.

use crate::dataset::{self, CarSample, DatasetError};
use crate::regression::{self, LinearModel, RegressionError, TrainOptions};
use crate::ui::components::scatterplot;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use iced::{
    widget::{button, text_input, Button, Column, Row, Text},
    Element, Length, Task,
};

/// Dataset lifecycle on this screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dataset {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<CarSample>),
    Failed(DatasetError),
}

/// Regression screen state.
#[derive(Debug, Default)]
pub struct State {
    dataset: Dataset,
    model: Option<LinearModel>,
    training: bool,
    training_error: Option<RegressionError>,
    prediction_input: String,
    prediction: Option<(f64, f64)>,
    prediction_error: bool,
}

/// Messages handled by the regression screen.
#[derive(Debug, Clone)]
pub enum Message {
    FetchPressed,
    DatasetLoaded(Result<Vec<CarSample>, DatasetError>),
    TrainPressed,
    TrainingFinished(Result<LinearModel, RegressionError>),
    PredictionInputChanged(String),
    PredictPressed,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[cfg(test)]
    pub(crate) fn model(&self) -> Option<&LinearModel> {
        self.model.as_ref()
    }

    /// Handles a message; `dataset_url` and `epochs` come from the app's
    /// persisted preferences.
    pub fn update(&mut self, message: Message, dataset_url: &str, epochs: u32) -> Task<Message> {
        match message {
            Message::FetchPressed => {
                if self.dataset == Dataset::Loading {
                    return Task::none();
                }
                self.dataset = Dataset::Loading;
                self.model = None;
                self.training_error = None;
                self.prediction = None;

                let url = dataset_url.to_string();
                Task::perform(async move { dataset::fetch(&url).await }, Message::DatasetLoaded)
            }
            Message::DatasetLoaded(result) => {
                self.dataset = match result {
                    Ok(samples) => Dataset::Loaded(samples),
                    Err(err) => {
                        eprintln!("Failed to fetch dataset: {err}");
                        Dataset::Failed(err)
                    }
                };
                Task::none()
            }
            Message::TrainPressed => {
                let Dataset::Loaded(samples) = &self.dataset else {
                    return Task::none();
                };
                if self.training {
                    return Task::none();
                }

                self.training = true;
                self.training_error = None;
                self.prediction = None;

                let xs: Vec<f64> = samples.iter().map(|s| s.horsepower).collect();
                let ys: Vec<f64> = samples.iter().map(|s| s.mpg).collect();
                let options = TrainOptions::with_epochs(epochs);
                // Run the gradient-descent loop in a blocking task to avoid
                // blocking the UI.
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || {
                            regression::train(&xs, &ys, options)
                        })
                        .await
                        .map_err(|e| RegressionError::TaskFailed(e.to_string()))?
                    },
                    Message::TrainingFinished,
                )
            }
            Message::TrainingFinished(result) => {
                self.training = false;
                match result {
                    Ok(model) => self.model = Some(model),
                    Err(err) => {
                        eprintln!("Training failed: {err}");
                        self.training_error = Some(err);
                    }
                }
                Task::none()
            }
            Message::PredictionInputChanged(value) => {
                self.prediction_input = value;
                self.prediction_error = false;
                Task::none()
            }
            Message::PredictPressed => {
                let Some(model) = &self.model else {
                    return Task::none();
                };
                match self.prediction_input.trim().parse::<f64>() {
                    Ok(x) if x.is_finite() => {
                        self.prediction = Some((x, model.predict(x)));
                        self.prediction_error = false;
                    }
                    _ => {
                        self.prediction_error = true;
                        self.prediction = None;
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = Text::new("Regression").size(typography::TITLE);

        let mut controls = Row::new().spacing(spacing::SM);
        controls = controls.push(match self.dataset {
            Dataset::Loading => Button::new(Text::new("Fetching…")),
            _ => Button::new(Text::new("Fetch dataset")).on_press(Message::FetchPressed),
        });
        controls = controls.push(match (&self.dataset, self.training) {
            (Dataset::Loaded(_), false) => {
                Button::new(Text::new("Train model")).on_press(Message::TrainPressed)
            }
            (_, true) => Button::new(Text::new("Training…")),
            _ => Button::new(Text::new("Train model")).style(button::secondary),
        });

        let status: Element<'_, Message> = match &self.dataset {
            Dataset::NotLoaded => Text::new("Dataset not loaded")
                .size(typography::CAPTION)
                .into(),
            Dataset::Loading => Text::new("Fetching dataset…")
                .size(typography::CAPTION)
                .into(),
            Dataset::Loaded(samples) => {
                Text::new(format!("{} usable samples", samples.len()))
                    .size(typography::CAPTION)
                    .into()
            }
            Dataset::Failed(err) => Text::new(err.to_string())
                .size(typography::CAPTION)
                .color(palette::ERROR_500)
                .into(),
        };

        let mut column = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(title)
            .push(controls)
            .push(status);

        if let Some(err) = &self.training_error {
            column = column.push(
                Text::new(err.to_string())
                    .size(typography::CAPTION)
                    .color(palette::ERROR_500),
            );
        }

        if let Dataset::Loaded(samples) = &self.dataset {
            let line = self.model.as_ref().map(|model| {
                let (x_min, x_max) = horsepower_range(samples);
                model.line(x_min, x_max)
            });
            column = column.push(scatterplot::view(samples, line));

            if let Some(model) = &self.model {
                column = column.push(
                    Text::new(format!("Final loss: {:.5}", model.final_loss()))
                        .size(typography::CAPTION),
                );
                column = column.push(self.prediction_row());
            }
        }

        column.into()
    }

    fn prediction_row(&self) -> Element<'_, Message> {
        let input = text_input("Horsepower, e.g. 120", &self.prediction_input)
            .on_input(Message::PredictionInputChanged)
            .on_submit(Message::PredictPressed)
            .width(Length::Fixed(sizing::INPUT_WIDTH));

        let mut row = Row::new()
            .spacing(spacing::SM)
            .push(input)
            .push(Button::new(Text::new("Predict MPG")).on_press(Message::PredictPressed));

        if self.prediction_error {
            row = row.push(
                Text::new("Enter a finite number")
                    .size(typography::CAPTION)
                    .color(palette::ERROR_500),
            );
        } else if let Some((x, y)) = self.prediction {
            row = row.push(
                Text::new(format!("{x:.0} hp → {y:.1} MPG"))
                    .size(typography::CAPTION)
                    .color(palette::SUCCESS_500),
            );
        }

        row.into()
    }
}

fn horsepower_range(samples: &[CarSample]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for sample in samples {
        min = min.min(sample.horsepower);
        max = max.max(sample.horsepower);
    }
    (min, max)
}
