//! Gesture Web - browser hand gesture recognition
//!
//! Turns per-frame hand landmarks from a pose detector into a debounced
//! gesture label with a confidence score.
//!
//! - `landmarks`, `physics`, `classifier`, `session`: the pure pipeline,
//!   usable and testable without a browser
//! - `bridge`: wasm_bindgen entry points for the page

pub mod classifier;
pub mod config;
pub mod error;
pub mod landmarks;
pub mod physics;
pub mod session;

mod bridge;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    clear_gesture_callback, configure, get_config, get_session_stats, is_tracking,
    process_landmarks, reset_session_stats, set_detector_timeout, set_gesture_callback,
    set_sensitivity, set_smoothing, start_tracking, stop_tracking, track_frame,
};
pub use bridge::{parse_flat_hands, parse_hands_json, FLOATS_PER_HAND, MAX_HANDS};

pub use classifier::Gesture;
pub use config::GestureConfig;
pub use error::{TrackingError, TrackingResult};
pub use session::{GestureResult, GestureSession, SessionStats};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    bridge::init_logging();
}
