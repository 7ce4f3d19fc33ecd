//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod detector;
mod hands;
mod logging;
mod tracker;

pub use tracker::{
    // Lifecycle
    start_tracking,
    stop_tracking,
    is_tracking,
    // Configuration
    set_sensitivity,
    set_smoothing,
    set_detector_timeout,
    configure,
    get_config,
    // Frame processing
    set_gesture_callback,
    clear_gesture_callback,
    track_frame,
    process_landmarks,
    // Statistics
    get_session_stats,
    reset_session_stats,
};

pub use hands::{parse_flat_hands, parse_hands_json, FLOATS_PER_HAND, MAX_HANDS};
pub use logging::init_logging;
