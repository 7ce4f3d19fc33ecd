//! Rule-based gesture classification
//!
//! A flat decision table over the finger-extension pattern, evaluated in
//! priority order (first match wins). Distance-based confidences use pixel
//! space, z ignored.

use tracing::trace;

use super::model::{Classification, Gesture};
use crate::landmarks::{
    distance_2d, Landmark, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP, THUMB_TIP, WRIST,
};
use crate::physics::FingerGeometry;

/// Index tip to wrist distance at which a fist scores zero
const FIST_REACH_PX: f32 = 100.0;
const FIST_SCALE_PX: f32 = 50.0;
/// Thumb to pinky span for a fully confident open hand
const OPEN_HAND_SPAN_PX: f32 = 200.0;
/// Index to middle tip gap for a fully confident peace sign
const PEACE_SPREAD_PX: f32 = 50.0;
/// Thumb and index tips must be closer than this for an OK sign
pub const OK_SIGN_MAX_GAP_PX: f32 = 30.0;

const POINTING_CONFIDENCE: f32 = 0.9;
const THUMBS_UP_CONFIDENCE: f32 = 0.85;
const OK_SIGN_CONFIDENCE: f32 = 0.8;
const ROCK_SIGN_CONFIDENCE: f32 = 0.75;
const CALL_ME_CONFIDENCE: f32 = 0.7;
const FINGER_COUNT_CONFIDENCE: f32 = 0.6;

/// Classify one hand
///
/// Pure: the same geometry and landmarks always give the same result.
/// The sensitivity gate is applied separately by [`apply_sensitivity`].
pub fn classify(geometry: &FingerGeometry, landmarks: &[Landmark; LANDMARK_COUNT]) -> Classification {
    let [thumb, index, middle, ring, pinky] = geometry.extended;
    let count = geometry.extended_count();
    let dist = |a: usize, b: usize| distance_2d(&landmarks[a], &landmarks[b]);

    let (gesture, confidence) = if count == 0 {
        (Gesture::Fist, (FIST_REACH_PX - dist(INDEX_TIP, WRIST)) / FIST_SCALE_PX)
    } else if count == 5 {
        (Gesture::OpenHand, dist(THUMB_TIP, PINKY_TIP) / OPEN_HAND_SPAN_PX)
    } else if index && count == 1 {
        (Gesture::Pointing, POINTING_CONFIDENCE)
    } else if index && middle && !ring && !pinky {
        (Gesture::PeaceSign, dist(INDEX_TIP, MIDDLE_TIP) / PEACE_SPREAD_PX)
    } else if thumb && count == 1 {
        (Gesture::ThumbsUp, THUMBS_UP_CONFIDENCE)
    } else if thumb && index && count == 2 && dist(THUMB_TIP, INDEX_TIP) < OK_SIGN_MAX_GAP_PX {
        (Gesture::OkSign, OK_SIGN_CONFIDENCE)
    } else if index && pinky && !middle && !ring {
        (Gesture::RockSign, ROCK_SIGN_CONFIDENCE)
    } else if thumb && pinky && !index && !middle && !ring {
        (Gesture::CallMe, CALL_ME_CONFIDENCE)
    } else {
        (Gesture::Fingers(count as u8), FINGER_COUNT_CONFIDENCE)
    };

    let result = Classification::new(gesture, confidence);
    trace!("classified {:?} -> {} ({:.2})", geometry.extended, result.gesture, result.confidence);
    result
}

/// Demote a classification below the sensitivity floor to "Uncertain"
pub fn apply_sensitivity(classification: Classification, sensitivity: f32) -> Classification {
    if classification.confidence < sensitivity {
        Classification::uncertain()
    } else {
        classification
    }
}
