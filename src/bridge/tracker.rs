//! Tracking session storage and JS entry points
//!
//! The page drives one frame at a time: it awaits `track_frame` (or calls
//! `process_landmarks` with its own detector output) and schedules the
//! next frame afterwards. Calls never overlap, so plain thread-local state
//! is enough. No borrow is held across an await or a JS callback.

use std::cell::RefCell;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use super::detector::estimate_hands;
use super::hands::parse_flat_hands;
use crate::config::GestureConfig;
use crate::error::{TrackingError, TrackingResult};
use crate::landmarks::Hand;
use crate::session::{GestureResult, GestureSession, SessionStats};

#[derive(Default)]
struct TrackerState {
    /// Survives stop/start
    config: GestureConfig,
    /// Present while tracking
    session: Option<GestureSession>,
    stats: SessionStats,
    /// Bumped on every start/stop; frames from an older run are dropped
    generation: u64,
    /// onGestureDetected(gesture, confidence, handData)
    callback: Option<js_sys::Function>,
    /// An `estimateHands` call has not settled yet (it may have timed out)
    detector_busy: bool,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static TRACKER: RefCell<TrackerState> = RefCell::new(TrackerState::default());
}

// ============================================================================
// LIFECYCLE
// ============================================================================

/// Begin a tracking run with fresh smoothing and history state
#[wasm_bindgen]
pub fn start_tracking() {
    TRACKER.with(|cell| {
        let mut state = cell.borrow_mut();
        state.generation += 1;
        state.session = Some(GestureSession::new());
        info!("tracking started (run {})", state.generation);
    });
}

/// Stop tracking. A frame already awaiting the detector is discarded.
#[wasm_bindgen]
pub fn stop_tracking() {
    TRACKER.with(|cell| {
        let mut state = cell.borrow_mut();
        if let Some(session) = state.session.take() {
            state.generation += 1;
            info!("tracking stopped after {} frames", session.frames_processed());
        }
    });
}

#[wasm_bindgen]
pub fn is_tracking() -> bool {
    TRACKER.with(|cell| cell.borrow().session.is_some())
}

// ============================================================================
// CONFIGURATION
// ============================================================================

fn with_config<T>(f: impl FnOnce(&mut GestureConfig) -> TrackingResult<T>) -> TrackingResult<T> {
    TRACKER.with(|cell| f(&mut cell.borrow_mut().config))
}

#[wasm_bindgen]
pub fn set_sensitivity(value: f32) -> Result<(), JsValue> {
    Ok(with_config(|config| config.set_sensitivity(value))?)
}

#[wasm_bindgen]
pub fn set_smoothing(value: f32) -> Result<(), JsValue> {
    Ok(with_config(|config| config.set_smoothing(value))?)
}

#[wasm_bindgen]
pub fn set_detector_timeout(timeout_ms: u32) -> Result<(), JsValue> {
    Ok(with_config(|config| config.set_detector_timeout(timeout_ms))?)
}

/// Replace the configuration from a JSON object; missing fields take defaults
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let parsed = GestureConfig::from_json(json)?;
    with_config(|config| {
        *config = parsed;
        Ok(())
    })?;
    debug!("configuration replaced: {}", parsed.to_json());
    Ok(())
}

#[wasm_bindgen]
pub fn get_config() -> String {
    TRACKER.with(|cell| cell.borrow().config.to_json())
}

// ============================================================================
// FRAME PROCESSING
// ============================================================================

/// Register onGestureDetected(gesture, confidence, handData | undefined)
#[wasm_bindgen]
pub fn set_gesture_callback(callback: js_sys::Function) {
    TRACKER.with(|cell| cell.borrow_mut().callback = Some(callback));
}

#[wasm_bindgen]
pub fn clear_gesture_callback() {
    TRACKER.with(|cell| cell.borrow_mut().callback = None);
}

/// Detect and classify one frame
///
/// Calls `detector.estimateHands(frame)` with the configured timeout.
/// Resolves to the result JSON, or null when the frame was skipped
/// (detector error, timeout, an earlier call still running, or tracking
/// stopped meanwhile). At most one detector call is outstanding.
#[wasm_bindgen]
pub async fn track_frame(detector: JsValue, frame: JsValue) -> Result<JsValue, JsValue> {
    let Some((generation, timeout_ms)) = claim_detector()? else {
        debug!("detector still busy, skipping frame");
        return Ok(JsValue::NULL);
    };

    let detection = estimate_hands(&detector, &frame, timeout_ms, detector_settled).await;

    match run_pipeline(detection, Some(generation))? {
        Some(result) => Ok(JsValue::from_str(&result.to_json()?)),
        None => Ok(JsValue::NULL),
    }
}

/// Reserve the detector for one call: (run generation, timeout), or None
/// while an earlier call is still outstanding
fn claim_detector() -> TrackingResult<Option<(u64, u32)>> {
    TRACKER.with(|cell| {
        let mut state = cell.borrow_mut();
        if state.session.is_none() {
            return Err(TrackingError::NotTracking);
        }
        if state.detector_busy {
            return Ok(None);
        }
        state.detector_busy = true;
        Ok(Some((state.generation, state.config.detector_timeout_ms)))
    })
}

fn detector_settled() {
    TRACKER.with(|cell| cell.borrow_mut().detector_busy = false);
}

/// Classify landmarks the page obtained itself
///
/// `flat_data` holds 63 floats per hand (x, y, z per landmark), and
/// `handedness` has one byte per hand (0 = Left, 1 = Right).
#[wasm_bindgen]
pub fn process_landmarks(
    flat_data: &[f32],
    num_hands: usize,
    handedness: &[u8],
    scores: &[f32],
) -> Result<Option<String>, JsValue> {
    let detection = parse_flat_hands(flat_data, num_hands, handedness, scores);
    match run_pipeline(detection, None)? {
        Some(result) => Ok(Some(result.to_json()?)),
        None => Ok(None),
    }
}

/// Feed one detection through the session, record stats, notify the page
fn run_pipeline(
    detection: TrackingResult<Vec<Hand>>,
    expected_generation: Option<u64>,
) -> TrackingResult<Option<GestureResult>> {
    let processed = TRACKER.with(|cell| -> TrackingResult<Option<(GestureResult, Option<js_sys::Function>)>> {
        let mut state = cell.borrow_mut();
        if expected_generation.is_some_and(|g| g != state.generation) {
            debug!("discarding frame from a stopped run");
            return Ok(None);
        }

        let config = state.config;
        let TrackerState { session, stats, callback, .. } = &mut *state;
        let session = session.as_mut().ok_or(TrackingError::NotTracking)?;

        Ok(session.process_detection(detection, &config).map(|result| {
            stats.record(&result, js_sys::Date::now());
            (result, callback.clone())
        }))
    })?;

    let Some((result, callback)) = processed else {
        return Ok(None);
    };
    if let Some(callback) = callback {
        notify(&callback, &result);
    }
    Ok(Some(result))
}

fn notify(callback: &js_sys::Function, result: &GestureResult) {
    let hand_data = match &result.hand_data {
        Some(data) => match serde_json::to_string(data)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|json| js_sys::JSON::parse(&json))
        {
            Ok(value) => value,
            Err(e) => {
                warn!("could not encode hand data: {:?}", e);
                JsValue::UNDEFINED
            }
        },
        None => JsValue::UNDEFINED,
    };

    let gesture = JsValue::from_str(&result.gesture.label());
    let confidence = JsValue::from_f64(f64::from(result.confidence));
    if let Err(e) = callback.call3(&JsValue::NULL, &gesture, &confidence, &hand_data) {
        warn!("gesture callback threw: {:?}", e);
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

#[wasm_bindgen]
pub fn get_session_stats() -> String {
    TRACKER.with(|cell| cell.borrow().stats.to_json())
}

#[wasm_bindgen]
pub fn reset_session_stats() {
    TRACKER.with(|cell| cell.borrow_mut().stats.reset());
}
