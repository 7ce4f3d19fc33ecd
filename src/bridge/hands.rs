//! Hand data decoding from JavaScript
//!
//! Two input shapes are accepted:
//! - flat Float32Array, 63 values per hand (21 landmarks × x, y, z)
//! - the detector's own output, converted through `JSON.stringify`

use crate::error::{TrackingError, TrackingResult};
use crate::landmarks::{Hand, Handedness, Landmark, LANDMARK_COUNT};

/// Detector is configured for at most two hands
pub const MAX_HANDS: usize = 2;

pub const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

/// Decode a flat landmark buffer
///
/// `handedness[h]` is 0 for Left, anything else Right (Right if missing).
/// A NaN z means the detector gave no depth for that point. A non-finite
/// x or y rejects the whole frame.
pub fn parse_flat_hands(
    flat_data: &[f32],
    num_hands: usize,
    handedness: &[u8],
    scores: &[f32],
) -> TrackingResult<Vec<Hand>> {
    let num_hands = num_hands.min(MAX_HANDS);
    let expected = num_hands * FLOATS_PER_HAND;
    if flat_data.len() < expected {
        return Err(TrackingError::InvalidLandmarks {
            expected,
            actual: flat_data.len(),
        });
    }

    (0..num_hands)
        .map(|h| {
            let mut keypoints = [Landmark::default(); LANDMARK_COUNT];
            for (i, kp) in keypoints.iter_mut().enumerate() {
                let base = h * FLOATS_PER_HAND + i * 3;
                let (x, y, z) = (flat_data[base], flat_data[base + 1], flat_data[base + 2]);
                // A bad x/y would stick in the smoother for the rest of the run
                if !x.is_finite() || !y.is_finite() {
                    return Err(TrackingError::NonFiniteLandmark { hand: h, landmark: i });
                }
                *kp = Landmark {
                    x,
                    y,
                    z: z.is_finite().then_some(z),
                };
            }

            Ok(Hand {
                keypoints,
                handedness: match handedness.get(h) {
                    Some(0) => Handedness::Left,
                    _ => Handedness::Right,
                },
                score: scores.get(h).copied().unwrap_or(0.0),
            })
        })
        .collect()
}

/// Decode `JSON.stringify(await detector.estimateHands(frame))`
pub fn parse_hands_json(json: &str) -> TrackingResult<Vec<Hand>> {
    let mut hands: Vec<Hand> = serde_json::from_str(json)?;
    hands.truncate(MAX_HANDS);
    Ok(hands)
}
