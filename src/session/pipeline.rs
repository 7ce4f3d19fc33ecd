//! Per-frame gesture pipeline
//!
//! detection -> smoothing -> finger geometry -> classification
//! -> sensitivity gate -> history debounce -> result
//!
//! One `GestureSession` lives for one tracking run. It owns all mutable
//! frame state; configuration is passed in per frame.

use serde::Serialize;
use tracing::{debug, warn};

use crate::classifier::{apply_sensitivity, classify, Classification, Gesture, GestureHistory};
use crate::config::GestureConfig;
use crate::error::{TrackingError, TrackingResult};
use crate::landmarks::{Hand, Handedness, Landmark, LANDMARK_COUNT};
use crate::physics::{ExtendedFingers, FingerAngles, FingerGeometry, LandmarkSmoother};

/// Frame data behind a classification
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandData {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    pub angles: FingerAngles,
    pub extended_fingers: ExtendedFingers,
    pub handedness: Handedness,
}

/// One emitted result per processed frame
///
/// `gesture` is the debounced label while `confidence` and `hand_data`
/// describe the current frame only, so they can disagree with the label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureResult {
    pub gesture: Gesture,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_data: Option<HandData>,
}

impl GestureResult {
    pub fn to_json(&self) -> TrackingResult<String> {
        serde_json::to_string(self).map_err(TrackingError::Encode)
    }
}

#[derive(Debug, Default)]
pub struct GestureSession {
    smoother: LandmarkSmoother,
    history: GestureHistory,
    frames_processed: u64,
    last_gesture: Option<Gesture>,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the outcome of one detector call
    ///
    /// A failed detection skips the frame: nothing is emitted and no state
    /// changes.
    pub fn process_detection(
        &mut self,
        detection: TrackingResult<Vec<Hand>>,
        config: &GestureConfig,
    ) -> Option<GestureResult> {
        match detection {
            Ok(hands) => Some(self.process_hands(&hands, config)),
            Err(e) => {
                warn!("skipping frame {}: {}", self.frames_processed + 1, e);
                None
            }
        }
    }

    /// Run the pipeline over one frame's detected hands
    pub fn process_hands(&mut self, hands: &[Hand], config: &GestureConfig) -> GestureResult {
        self.frames_processed += 1;

        // No hands bypasses classification: the fixed result is emitted as
        // is, and the empty frame still votes in the history window.
        let Some((primary, others)) = hands.split_first() else {
            self.history.push(Gesture::NoHands);
            let empty = Classification::no_hands();
            return self.emit(empty.gesture, empty, None);
        };

        // Every slot is smoothed so its history stays current; the first
        // hand drives the result.
        let landmarks = self.smoother.smooth(0, &primary.keypoints, config.smoothing);
        for (i, hand) in others.iter().enumerate() {
            self.smoother.smooth(i + 1, &hand.keypoints, config.smoothing);
        }

        let geometry = FingerGeometry::analyze(&landmarks);
        let raw = classify(&geometry, &landmarks);
        let gated = apply_sensitivity(raw, config.sensitivity);
        let gesture = self.history.push(gated.gesture);

        let hand_data = HandData {
            landmarks,
            angles: geometry.angles,
            extended_fingers: geometry.extended,
            handedness: primary.handedness,
        };
        self.emit(gesture, gated, Some(hand_data))
    }

    fn emit(&mut self, gesture: Gesture, frame: Classification, hand_data: Option<HandData>) -> GestureResult {
        if self.last_gesture != Some(gesture) {
            debug!(
                "gesture -> {} (frame {}: {} {:.2})",
                gesture, self.frames_processed, frame.gesture, frame.confidence
            );
            self.last_gesture = Some(gesture);
        }

        GestureResult {
            gesture,
            confidence: frame.confidence,
            hand_data,
        }
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Clear smoothing and history (tracking restart)
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.history.clear();
        self.frames_processed = 0;
        self.last_gesture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{distance_2d, fixtures, PINKY_TIP, THUMB_TIP};

    const OPEN: [bool; 5] = [true; 5];
    const FIST: [bool; 5] = [false; 5];
    const POINT: [bool; 5] = [false, true, false, false, false];

    fn run(session: &mut GestureSession, pattern: [bool; 5]) -> GestureResult {
        session.process_hands(&[fixtures::hand(pattern)], &GestureConfig::default())
    }

    #[test]
    fn test_open_hand_end_to_end() {
        let mut session = GestureSession::new();
        let result = run(&mut session, OPEN);

        let lm = fixtures::hand_pose(OPEN);
        let expected = distance_2d(&lm[THUMB_TIP], &lm[PINKY_TIP]) / 200.0;
        assert_eq!(result.gesture, Gesture::OpenHand);
        assert!((result.confidence - expected).abs() < 1e-6);

        let data = result.hand_data.unwrap();
        assert_eq!(data.extended_fingers, [true; 5]);
        assert_eq!(data.handedness, Handedness::Right);
        assert_eq!(data.landmarks, lm);
    }

    #[test]
    fn test_low_confidence_becomes_uncertain() {
        let mut session = GestureSession::new();
        let mut config = GestureConfig::default();
        config.set_sensitivity(0.95).unwrap();

        let result = session.process_hands(&[fixtures::hand(POINT)], &config);
        assert_eq!(result.gesture, Gesture::Uncertain);
        assert_eq!(result.confidence, 0.0);
        assert!(result.hand_data.is_some());
    }

    #[test]
    fn test_narrow_open_hand_becomes_uncertain() {
        let mut session = GestureSession::new();
        let mut hand = fixtures::hand(OPEN);
        // Pinky still extended, but close to the thumb
        hand.keypoints[PINKY_TIP] = Landmark::new(250.0, 280.0);
        let span = distance_2d(&hand.keypoints[THUMB_TIP], &hand.keypoints[PINKY_TIP]);
        assert!(span < 140.0);

        let result = session.process_hands(&[hand], &GestureConfig::default());
        assert_eq!(result.gesture, Gesture::Uncertain);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.hand_data.unwrap().extended_fingers, OPEN);
    }

    #[test]
    fn test_hand_leaving_emits_no_hands() {
        let mut session = GestureSession::new();
        for _ in 0..4 {
            run(&mut session, OPEN);
        }
        let result = session.process_hands(&[], &GestureConfig::default());
        assert_eq!(result.gesture, Gesture::NoHands);
        assert_eq!(result.confidence, 0.0);
        assert!(result.hand_data.is_none());

        // The empty frame is outvoted once the hand is back
        assert_eq!(run(&mut session, OPEN).gesture, Gesture::OpenHand);
    }

    #[test]
    fn test_no_hands_every_frame() {
        let mut session = GestureSession::new();
        for _ in 0..5 {
            let result = session.process_hands(&[], &GestureConfig::default());
            assert_eq!(result.gesture, Gesture::NoHands);
            assert_eq!(result.confidence, 0.0);
            assert!(result.hand_data.is_none());
        }
        assert_eq!(session.frames_processed(), 5);
    }

    #[test]
    fn test_label_debounced_but_hand_data_current() {
        let mut session = GestureSession::new();
        let mut config = GestureConfig::default();
        config.set_smoothing(0.0).unwrap();

        for _ in 0..3 {
            session.process_hands(&[fixtures::hand(FIST)], &config);
        }
        let result = session.process_hands(&[fixtures::hand(POINT)], &config);

        // Majority is still Fist, frame data is the pointing hand
        assert_eq!(result.gesture, Gesture::Fist);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.hand_data.unwrap().extended_fingers, POINT);
    }

    #[test]
    fn test_no_hands_votes_in_history() {
        let mut session = GestureSession::new();
        let config = GestureConfig::default();
        for _ in 0..3 {
            session.process_hands(&[], &config);
        }
        let result = session.process_hands(&[fixtures::hand(POINT)], &config);
        assert_eq!(result.gesture, Gesture::NoHands);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_smoothing_applies_to_primary_hand() {
        let mut session = GestureSession::new();
        let config = GestureConfig::default();
        let first = fixtures::hand(OPEN);
        let mut moved = first.clone();
        moved.keypoints = fixtures::shifted(&first.keypoints, 50.0, 0.0);

        session.process_hands(&[first.clone()], &config);
        let result = session.process_hands(&[moved], &config);
        let wrist = result.hand_data.unwrap().landmarks[0];
        // 0.8 * 200 + 0.2 * 250
        assert!((wrist.x - 210.0).abs() < 1e-3);
    }

    #[test]
    fn test_second_hand_smoothed_in_own_slot() {
        let mut session = GestureSession::new();
        let config = GestureConfig::default();
        let left = fixtures::hand(FIST);
        let mut right = fixtures::hand(OPEN);
        right.keypoints = fixtures::shifted(&right.keypoints, 300.0, 0.0);

        session.process_hands(&[left.clone(), right], &config);
        // Second hand leaves: slot 0 is unaffected by slot 1's history
        let result = session.process_hands(&[left.clone()], &config);
        let landmarks = result.hand_data.unwrap().landmarks;
        for (a, b) in landmarks.iter().zip(left.keypoints.iter()) {
            assert!((a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3);
        }
        assert!(session.smoother.is_primed(1));
    }

    #[test]
    fn test_failed_detection_skips_frame() {
        let mut session = GestureSession::new();
        let config = GestureConfig::default();
        run(&mut session, OPEN);

        let skipped = session.process_detection(Err(TrackingError::Timeout(1000)), &config);
        assert!(skipped.is_none());
        assert_eq!(session.frames_processed(), 1);

        let next = session.process_detection(Ok(vec![fixtures::hand(OPEN)]), &config);
        assert_eq!(next.unwrap().gesture, Gesture::OpenHand);
    }

    #[test]
    fn test_reset_clears_history_and_smoothing() {
        let mut session = GestureSession::new();
        for _ in 0..5 {
            run(&mut session, FIST);
        }
        session.reset();
        assert_eq!(session.frames_processed(), 0);

        let result = run(&mut session, POINT);
        assert_eq!(result.gesture, Gesture::Pointing);
        assert_eq!(result.hand_data.unwrap().landmarks, fixtures::hand_pose(POINT));
    }

    #[test]
    fn test_result_json_shape() {
        let mut session = GestureSession::new();
        let json = run(&mut session, OPEN).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["gesture"], "Open Hand");
        assert_eq!(value["handData"]["extendedFingers"].as_array().unwrap().len(), 5);
        assert_eq!(value["handData"]["handedness"], "Right");
        assert_eq!(value["handData"]["landmarks"].as_array().unwrap().len(), 21);

        let json = session.process_hands(&[], &GestureConfig::default()).to_json().unwrap();
        assert_eq!(json, r#"{"gesture":"No hands detected","confidence":0.0}"#);
    }
}
