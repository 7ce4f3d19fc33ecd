//! Physics module - landmark smoothing and finger geometry
//!
//! Re-exports only. All logic in submodules.

mod smoothing;
mod angles;
mod geometry;

pub use smoothing::{LandmarkSmoother, MAX_SMOOTHING};
pub use angles::joint_angle;
pub use geometry::{
    extended_fingers, finger_angles,
    ExtendedFingers, FingerAngles, FingerGeometry, EXTENSION_MARGIN_PX,
};
