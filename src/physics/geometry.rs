//! Finger geometry - joint angles and extension flags for one frame
//!
//! Extension is a pixel-space heuristic with fixed thresholds. The thumb
//! compares x (mirrored front-facing camera), the other fingers compare y.

use serde::Serialize;

use super::angles::joint_angle;
use crate::landmarks::{Landmark, FINGER_BASES, FINGER_COUNT, FINGER_JOINTS, FINGERTIPS, LANDMARK_COUNT};

/// Minimum tip offset past the base joint, in pixels
pub const EXTENSION_MARGIN_PX: f32 = 20.0;

/// Two joint angles (degrees) per finger, base to tip
pub type FingerAngles = [[f32; 2]; FINGER_COUNT];

/// Per-finger extension flags, thumb first
pub type ExtendedFingers = [bool; FINGER_COUNT];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FingerGeometry {
    pub angles: FingerAngles,
    pub extended: ExtendedFingers,
}

impl FingerGeometry {
    /// Analyze one hand's (smoothed) landmarks
    pub fn analyze(landmarks: &[Landmark; LANDMARK_COUNT]) -> Self {
        Self {
            angles: finger_angles(landmarks),
            extended: extended_fingers(landmarks),
        }
    }

    pub fn extended_count(&self) -> usize {
        self.extended.iter().filter(|&&e| e).count()
    }
}

/// Angles over consecutive joint triples of each finger
pub fn finger_angles(landmarks: &[Landmark; LANDMARK_COUNT]) -> FingerAngles {
    let mut angles = [[0.0; 2]; FINGER_COUNT];
    for (finger, joints) in FINGER_JOINTS.iter().enumerate() {
        for (k, angle) in angles[finger].iter_mut().enumerate() {
            *angle = joint_angle(
                &landmarks[joints[k]],
                &landmarks[joints[k + 1]],
                &landmarks[joints[k + 2]],
            );
        }
    }
    angles
}

pub fn extended_fingers(landmarks: &[Landmark; LANDMARK_COUNT]) -> ExtendedFingers {
    let mut extended = [false; FINGER_COUNT];
    for finger in 0..FINGER_COUNT {
        let tip = &landmarks[FINGERTIPS[finger]];
        let base = &landmarks[FINGER_BASES[finger]];
        extended[finger] = if finger == 0 {
            tip.x > base.x + EXTENSION_MARGIN_PX
        } else {
            tip.y < base.y - EXTENSION_MARGIN_PX
        };
    }
    extended
}
