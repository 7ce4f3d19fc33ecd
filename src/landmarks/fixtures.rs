//! Synthetic pixel-space hands for tests
//!
//! Front-facing, mirrored layout: wrist at the bottom, fingers pointing up,
//! thumb opening towards +x.

use super::hand::*;

const WRIST_POS: (f32, f32) = (200.0, 400.0);

/// (x, y) of each finger's MCP for index..pinky
const FINGER_MCPS: [(f32, f32); 4] = [(180.0, 300.0), (220.0, 300.0), (260.0, 300.0), (300.0, 310.0)];

/// Build a hand with the requested fingers extended
pub fn hand_pose(extended: [bool; FINGER_COUNT]) -> [Landmark; LANDMARK_COUNT] {
    let mut lm = [Landmark::default(); LANDMARK_COUNT];
    lm[WRIST] = Landmark::new(WRIST_POS.0, WRIST_POS.1);

    lm[THUMB_CMC] = Landmark::new(170.0, 380.0);
    lm[THUMB_MCP] = Landmark::new(150.0, 360.0);
    if extended[0] {
        lm[THUMB_IP] = Landmark::new(180.0, 345.0);
        lm[THUMB_TIP] = Landmark::new(210.0, 330.0);
    } else {
        lm[THUMB_IP] = Landmark::new(160.0, 360.0);
        lm[THUMB_TIP] = Landmark::new(165.0, 370.0);
    }

    for (i, &(x, y)) in FINGER_MCPS.iter().enumerate() {
        let [mcp, pip, dip, tip] = FINGER_JOINTS[i + 1];
        lm[mcp] = Landmark::new(x, y);
        if extended[i + 1] {
            lm[pip] = Landmark::new(x, y - 50.0);
            lm[dip] = Landmark::new(x, y - 90.0);
            lm[tip] = Landmark::new(x, y - 130.0);
        } else {
            lm[pip] = Landmark::new(x, y - 20.0);
            lm[dip] = Landmark::new(x + 5.0, y + 20.0);
            lm[tip] = Landmark::new(x + 5.0, y + 60.0);
        }
    }

    lm
}

pub fn hand(extended: [bool; FINGER_COUNT]) -> Hand {
    Hand {
        keypoints: hand_pose(extended),
        handedness: Handedness::Right,
        score: 0.95,
    }
}

/// Translate every landmark
pub fn shifted(landmarks: &[Landmark; LANDMARK_COUNT], dx: f32, dy: f32) -> [Landmark; LANDMARK_COUNT] {
    let mut out = *landmarks;
    for lm in out.iter_mut() {
        lm.x += dx;
        lm.y += dy;
    }
    out
}
