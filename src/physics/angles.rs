//! Joint angle calculation using dot product
//!
//! The angle at `joint` between the bones towards `prev` and `next`,
//! measured in the image plane.

use crate::landmarks::Landmark;

/// Calculate joint angle in degrees
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns angle in degrees:
/// - 180° = straight joint
/// - 90° = right-angle bend
pub fn joint_angle(prev: &Landmark, joint: &Landmark, next: &Landmark) -> f32 {
    let v1 = prev.xy() - joint.xy();
    let v2 = next.xy() - joint.xy();

    let mag1 = v1.norm();
    let mag2 = v2.norm();

    // Coincident joints: assume straight
    if mag1 < 0.0001 || mag2 < 0.0001 {
        return 180.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_joint() {
        let angle = joint_angle(
            &Landmark::new(0.0, 0.0),
            &Landmark::new(0.0, 50.0),
            &Landmark::new(0.0, 100.0),
        );
        assert!((angle - 180.0).abs() < 1.0);
    }

    #[test]
    fn test_bent_joint() {
        let angle = joint_angle(
            &Landmark::new(0.0, 0.0),
            &Landmark::new(50.0, 0.0),
            &Landmark::new(50.0, 50.0),
        );
        assert!((angle - 90.0).abs() < 1.0);
    }

    #[test]
    fn test_depth_is_ignored() {
        let flat = joint_angle(
            &Landmark::new(0.0, 0.0),
            &Landmark::new(10.0, 0.0),
            &Landmark::new(20.0, 10.0),
        );
        let deep = joint_angle(
            &Landmark::with_depth(0.0, 0.0, -40.0),
            &Landmark::with_depth(10.0, 0.0, 0.0),
            &Landmark::with_depth(20.0, 10.0, 90.0),
        );
        assert!((flat - deep).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_points_do_not_produce_nan() {
        let p = Landmark::new(5.0, 5.0);
        let angle = joint_angle(&p, &p, &Landmark::new(9.0, 9.0));
        assert_eq!(angle, 180.0);
    }
}
