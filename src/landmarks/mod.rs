//! Landmarks module - hand keypoint types and index tables
//!
//! Re-exports only. All logic in submodules.

mod hand;

#[cfg(test)]
pub(crate) mod fixtures;

pub use hand::{
    distance_2d,
    Hand,
    Handedness,
    Landmark,
    // Index tables
    FINGER_BASES, FINGER_COUNT, FINGER_JOINTS, FINGERTIPS, LANDMARK_COUNT,
    // Keypoints used by the classifier
    WRIST, THUMB_MCP, THUMB_TIP, INDEX_MCP, INDEX_TIP,
    MIDDLE_TIP, RING_TIP, PINKY_TIP,
};
