//! Classifier module - rule-based hand gesture classification
//!
//! Finger geometry in, labelled gesture out. History debouncing lives
//! here too since it operates on labels only.

mod buffer;
mod model;
mod rules;

pub use buffer::{GestureHistory, HISTORY_SIZE};
pub use model::{Classification, Gesture};
pub use rules::{apply_sensitivity, classify, OK_SIGN_MAX_GAP_PX};
