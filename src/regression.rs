// SPDX-License-Identifier: MPL-2.0
//! Toy single-feature linear regression.
//!
//! Both axes are min-max normalized, then `y = w·x + b` is fitted by
//! full-batch gradient descent on mean-squared error. Small enough to run
//! on the UI's background task for the cars dataset, yet real enough to
//! draw a sensible fit line.

use ndarray::Array1;

/// Result type for training operations.
pub type RegressionResult<T> = Result<T, RegressionError>;

/// Errors that can occur while training a model.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// No samples were provided.
    EmptyDataset,
    /// Inputs and outputs have different lengths.
    MismatchedLengths { inputs: usize, outputs: usize },
    /// Inputs are constant or non-finite, so no line can be fitted.
    DegenerateInput,
    /// Zero epochs or a non-positive learning rate.
    InvalidOptions,
    /// The loss stopped being finite during training.
    Diverged { epoch: u32 },
    /// The background training task failed to run to completion.
    TaskFailed(String),
}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionError::EmptyDataset => write!(f, "No samples to train on"),
            RegressionError::MismatchedLengths { inputs, outputs } => {
                write!(f, "Mismatched lengths: {inputs} inputs, {outputs} outputs")
            }
            RegressionError::DegenerateInput => {
                write!(f, "Inputs are constant or non-finite")
            }
            RegressionError::InvalidOptions => {
                write!(f, "Epochs must be positive and learning rate finite and positive")
            }
            RegressionError::Diverged { epoch } => {
                write!(f, "Training diverged at epoch {epoch}")
            }
            RegressionError::TaskFailed(msg) => {
                write!(f, "Training task failed: {msg}")
            }
        }
    }
}

impl std::error::Error for RegressionError {}

/// Hyperparameters for [`train`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    pub epochs: u32,
    pub learning_rate: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 200,
            learning_rate: 0.1,
        }
    }
}

impl TrainOptions {
    pub fn with_epochs(epochs: u32) -> Self {
        Self {
            epochs,
            ..Self::default()
        }
    }

    fn validate(self) -> RegressionResult<()> {
        if self.epochs == 0 || !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RegressionError::InvalidOptions);
        }
        Ok(())
    }
}

/// Min-max scaler for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scaler {
    min: f64,
    span: f64,
}

impl Scaler {
    /// Fits the scaler over `values`. Returns `None` when a value is
    /// non-finite. A zero span is kept as-is; callers decide whether that
    /// is an error (inputs) or harmless (constant outputs).
    fn fit(values: &Array1<f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in values {
            if !value.is_finite() {
                return None;
            }
            min = min.min(value);
            max = max.max(value);
        }
        Some(Self {
            min,
            span: max - min,
        })
    }

    fn with_unit_fallback(self) -> Self {
        if self.span == 0.0 {
            Self { span: 1.0, ..self }
        } else {
            self
        }
    }

    fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span
    }

    fn denormalize(&self, value: f64) -> f64 {
        value * self.span + self.min
    }
}

/// A trained line, ready for prediction and plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    weight: f64,
    bias: f64,
    x_scale: Scaler,
    y_scale: Scaler,
    final_loss: f64,
}

impl LinearModel {
    /// Predicts the output for a single input value.
    pub fn predict(&self, x: f64) -> f64 {
        let normalized = self.x_scale.normalize(x);
        self.y_scale
            .denormalize(self.weight * normalized + self.bias)
    }

    /// Endpoints of the fitted line over `[x0, x1]`, for plotting.
    pub fn line(&self, x0: f64, x1: f64) -> [(f64, f64); 2] {
        [(x0, self.predict(x0)), (x1, self.predict(x1))]
    }

    /// Mean-squared error of the returned parameters over the normalized
    /// training data.
    pub fn final_loss(&self) -> f64 {
        self.final_loss
    }
}

/// Fits `y = w·x + b` to the given samples.
///
/// # Errors
///
/// Rejects empty or length-mismatched data, constant or non-finite inputs,
/// invalid hyperparameters, and training runs whose loss leaves the finite
/// range.
pub fn train(xs: &[f64], ys: &[f64], options: TrainOptions) -> RegressionResult<LinearModel> {
    options.validate()?;

    if xs.is_empty() || ys.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }
    if xs.len() != ys.len() {
        return Err(RegressionError::MismatchedLengths {
            inputs: xs.len(),
            outputs: ys.len(),
        });
    }

    let raw_x = Array1::from_vec(xs.to_vec());
    let raw_y = Array1::from_vec(ys.to_vec());

    let x_scale = Scaler::fit(&raw_x).ok_or(RegressionError::DegenerateInput)?;
    if x_scale.span == 0.0 {
        return Err(RegressionError::DegenerateInput);
    }
    let y_scale = Scaler::fit(&raw_y)
        .ok_or(RegressionError::DegenerateInput)?
        .with_unit_fallback();

    let x = raw_x.mapv(|v| x_scale.normalize(v));
    let y = raw_y.mapv(|v| y_scale.normalize(v));

    let mut weight = 0.0_f64;
    let mut bias = 0.0_f64;

    for epoch in 0..options.epochs {
        let residual = x.mapv(|v| weight * v + bias) - &y;
        let loss = residual.mapv(|r| r * r).mean().unwrap_or(0.0);

        if !loss.is_finite() {
            return Err(RegressionError::Diverged { epoch });
        }

        let grad_weight = 2.0 * (&residual * &x).mean().unwrap_or(0.0);
        let grad_bias = 2.0 * residual.mean().unwrap_or(0.0);

        weight -= options.learning_rate * grad_weight;
        bias -= options.learning_rate * grad_bias;
    }

    // Loss of the parameters actually returned, not the pre-update value of
    // the last epoch. Also catches a final update that left the finite range.
    let residual = x.mapv(|v| weight * v + bias) - &y;
    let loss = residual.mapv(|r| r * r).mean().unwrap_or(0.0);
    if !loss.is_finite() {
        return Err(RegressionError::Diverged {
            epoch: options.epochs,
        });
    }

    Ok(LinearModel {
        weight,
        bias,
        x_scale,
        y_scale,
        final_loss: loss,
    })
}
