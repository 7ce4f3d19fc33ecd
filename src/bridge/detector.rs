//! Hand-pose detector call with timeout
//!
//! The detector is a JS object exposing `estimateHands(frame) -> Promise`.
//! Its promise is raced against a `setTimeout` so a stalled model skips
//! frames instead of stalling the tracking loop. A call that lost the race
//! keeps running; `on_settled` reports when it finally finishes.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use super::hands::parse_hands_json;
use crate::error::{TrackingError, TrackingResult};
use crate::landmarks::Hand;

/// Run one detection, bounded by `timeout_ms`
///
/// `on_settled` runs exactly once, when the detector's own promise settles
/// (or immediately if the call could not be started).
pub async fn estimate_hands(
    detector: &JsValue,
    frame: &JsValue,
    timeout_ms: u32,
    on_settled: impl FnOnce() + 'static,
) -> TrackingResult<Vec<Hand>> {
    let pending = match start_estimate(detector, frame) {
        Ok(pending) => pending,
        Err(e) => {
            on_settled();
            return Err(e);
        }
    };

    let watched = pending.clone();
    spawn_local(async move {
        let _ = JsFuture::from(watched).await;
        on_settled();
    });

    let deadline = Deadline::start(timeout_ms)?;
    let raced = js_sys::Promise::race(&js_sys::Array::of2(&pending, &deadline.promise));
    let value = JsFuture::from(raced).await.map_err(js_error)?;

    check_settled(deadline.is_expired(&value), js_sys::Array::is_array(&value), timeout_ms)?;
    drop(deadline);

    let json: String = js_sys::JSON::stringify(&value).map_err(js_error)?.into();
    parse_hands_json(&json)
}

/// Only the timer's own marker counts as a timeout
fn check_settled(expired: bool, is_array: bool, timeout_ms: u32) -> TrackingResult<()> {
    if expired {
        Err(TrackingError::Timeout(timeout_ms))
    } else if !is_array {
        Err(TrackingError::Detector("estimateHands() did not return an array".into()))
    } else {
        Ok(())
    }
}

fn start_estimate(detector: &JsValue, frame: &JsValue) -> TrackingResult<js_sys::Promise> {
    let estimate = js_sys::Reflect::get(detector, &JsValue::from_str("estimateHands")).map_err(js_error)?;
    let estimate: js_sys::Function = estimate
        .dyn_into()
        .map_err(|_| TrackingError::Detector("detector has no estimateHands()".into()))?;

    // Promise.resolve also covers detectors that return synchronously
    Ok(js_sys::Promise::resolve(&estimate.call1(detector, frame).map_err(js_error)?))
}

/// `setTimeout` promise resolving to a private marker; cleared on drop
struct Deadline {
    window: web_sys::Window,
    handle: i32,
    marker: JsValue,
    promise: js_sys::Promise,
}

impl Deadline {
    fn start(timeout_ms: u32) -> TrackingResult<Self> {
        let window = web_sys::window().ok_or(TrackingError::NoWindow)?;
        let delay = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        let marker: JsValue = js_sys::Object::new().into();

        // The executor runs synchronously inside Promise::new
        let mut scheduled: Result<i32, JsValue> = Ok(0);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_1(&resolve, delay, &marker);
        });
        let handle = scheduled.map_err(js_error)?;

        Ok(Self {
            window,
            handle,
            marker,
            promise,
        })
    }

    /// True when the race was won by the timer (identity comparison)
    fn is_expired(&self, value: &JsValue) -> bool {
        *value == self.marker
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

fn js_error(value: JsValue) -> TrackingError {
    TrackingError::Detector(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
