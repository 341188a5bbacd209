// SPDX-License-Identifier: MPL-2.0
//! Cars dataset retrieval and cleaning.
//!
//! The regression screen trains on the classic horsepower-vs-MPG dataset
//! published for the TensorFlow.js tutorials. Records arrive as a JSON array
//! where either field may be `null`; cleaning drops those records before the
//! data reaches the trainer.

use serde::Deserialize;

/// Default location of the cars dataset.
pub const CARS_DATASET_URL: &str = "https://storage.googleapis.com/tfjs-tutorials/carsData.json";

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while fetching or parsing the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// The HTTP request could not be sent or completed.
    RequestFailed(String),
    /// The server answered with a non-success status.
    HttpStatus(String),
    /// The response body was not the expected JSON shape.
    Malformed(String),
    /// Every record was dropped during cleaning.
    Empty,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::RequestFailed(msg) => write!(f, "Request failed: {msg}"),
            DatasetError::HttpStatus(status) => write!(f, "HTTP status: {status}"),
            DatasetError::Malformed(msg) => write!(f, "Malformed dataset: {msg}"),
            DatasetError::Empty => write!(f, "Dataset contains no usable records"),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Raw record as published: both measurements are nullable.
#[derive(Debug, Deserialize)]
struct RawCarRecord {
    #[serde(rename = "Miles_per_Gallon")]
    miles_per_gallon: Option<f64>,
    #[serde(rename = "Horsepower")]
    horsepower: Option<f64>,
}

/// A cleaned sample: both measurements present and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarSample {
    pub mpg: f64,
    pub horsepower: f64,
}

/// Parses the raw JSON payload and drops unusable records.
pub fn parse_records(json: &str) -> DatasetResult<Vec<CarSample>> {
    let raw: Vec<RawCarRecord> =
        serde_json::from_str(json).map_err(|e| DatasetError::Malformed(e.to_string()))?;

    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(cleaned)
}

fn clean(raw: Vec<RawCarRecord>) -> Vec<CarSample> {
    raw.into_iter()
        .filter_map(|record| match (record.miles_per_gallon, record.horsepower) {
            (Some(mpg), Some(horsepower)) if mpg.is_finite() && horsepower.is_finite() => {
                Some(CarSample { mpg, horsepower })
            }
            _ => None,
        })
        .collect()
}

/// Downloads and cleans the dataset from `url`.
///
/// # Errors
///
/// Returns an error if the request fails, the server responds with a
/// non-success status, the body is not the expected JSON array, or cleaning
/// leaves nothing to train on.
pub async fn fetch(url: &str) -> DatasetResult<Vec<CarSample>> {
    // Explicit redirect policy and user agent, as the bucket may redirect.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent("GestureLens/0.1.0")
        .build()
        .map_err(|e| DatasetError::RequestFailed(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DatasetError::RequestFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DatasetError::HttpStatus(response.status().to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| DatasetError::RequestFailed(e.to_string()))?;

    parse_records(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        { "Name": "chevrolet chevelle malibu", "Miles_per_Gallon": 18, "Horsepower": 130 },
        { "Name": "buick skylark 320", "Miles_per_Gallon": 15, "Horsepower": 165 },
        { "Name": "citroen ds-21 pallas", "Miles_per_Gallon": null, "Horsepower": 115 },
        { "Name": "ford mustang boss 302", "Miles_per_Gallon": 14, "Horsepower": null }
    ]"#;

    #[test]
    fn parse_drops_records_with_missing_fields() {
        let samples = parse_records(SAMPLE).expect("sample should parse");
        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0],
            CarSample {
                mpg: 18.0,
                horsepower: 130.0
            }
        );
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_records("{ not json").expect_err("must fail");
        assert!(matches!(err, DatasetError::Malformed(_)));
    }

    #[test]
    fn parse_rejects_non_array_payload() {
        let err = parse_records(r#"{ "error": "gone" }"#).expect_err("must fail");
        assert!(matches!(err, DatasetError::Malformed(_)));
    }

    #[test]
    fn all_null_records_yield_empty_error() {
        let json = r#"[ { "Miles_per_Gallon": null, "Horsepower": null } ]"#;
        assert_eq!(parse_records(json), Err(DatasetError::Empty));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"[ { "Miles_per_Gallon": 20, "Horsepower": 100, "Cylinders": 8 } ]"#;
        let samples = parse_records(json).expect("should parse");
        assert_eq!(samples.len(), 1);
    }

    #[tokio::test]
    async fn fetch_from_an_unroutable_url_is_a_request_failure() {
        // Port 0 is never routable, so this fails without touching the
        // network.
        let err = fetch("http://127.0.0.1:0/carsData.json")
            .await
            .expect_err("must fail");
        assert!(matches!(err, DatasetError::RequestFailed(_)));
    }

    #[test]
    fn display_messages_name_the_failure() {
        assert!(DatasetError::HttpStatus("404 Not Found".into())
            .to_string()
            .contains("404"));
        assert!(DatasetError::Empty.to_string().contains("no usable"));
    }
}
