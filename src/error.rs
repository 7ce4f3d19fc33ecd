//! Error types shared by the session and the JS bridge

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("hand detector failed: {0}")]
    Detector(String),

    #[error("hand detector did not respond within {0} ms")]
    Timeout(u32),

    #[error("malformed hand data: {0}")]
    MalformedHands(#[from] serde_json::Error),

    #[error("invalid landmark data length: {actual} (expected {expected})")]
    InvalidLandmarks { expected: usize, actual: usize },

    #[error("non-finite coordinate in hand {hand}, landmark {landmark}")]
    NonFiniteLandmark { hand: usize, landmark: usize },

    #[error("could not encode result: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no browser window available")]
    NoWindow,

    #[error("tracking is not active")]
    NotTracking,
}

pub type TrackingResult<T> = Result<T, TrackingError>;

impl From<TrackingError> for JsValue {
    fn from(err: TrackingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
