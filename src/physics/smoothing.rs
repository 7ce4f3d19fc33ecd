//! Exponential landmark smoothing
//!
//! Blends each new frame with the previous smoothed frame per hand slot.
//! Slots follow detection order, not hand identity.

use crate::landmarks::{Landmark, LANDMARK_COUNT};

/// Upper bound on the smoothing factor; 1.0 would freeze the output
pub const MAX_SMOOTHING: f32 = 0.95;

/// Exponential moving average over whole-hand landmark sets
#[derive(Debug, Default)]
pub struct LandmarkSmoother {
    /// Last smoothed output per slot (None until first observation)
    slots: Vec<Option<[Landmark; LANDMARK_COUNT]>>,
}

impl LandmarkSmoother {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Smooth one hand's landmarks
    ///
    /// - `slot`: detection index of the hand in this frame
    /// - `alpha`: weight of the previous frame, clamped to [0, 0.95]
    ///
    /// The first observation for a slot is stored and returned unchanged.
    pub fn smooth(
        &mut self,
        slot: usize,
        current: &[Landmark; LANDMARK_COUNT],
        alpha: f32,
    ) -> [Landmark; LANDMARK_COUNT] {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }

        let alpha = alpha.clamp(0.0, MAX_SMOOTHING);
        let smoothed = match &self.slots[slot] {
            None => *current,
            Some(prev) => {
                let mut out = *current;
                for (i, lm) in out.iter_mut().enumerate() {
                    *lm = blend(&prev[i], &current[i], alpha);
                }
                out
            }
        };

        self.slots[slot] = Some(smoothed);
        smoothed
    }

    /// Whether a slot has history
    pub fn is_primed(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    /// Forget all slots (tracking restart)
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}

fn blend(prev: &Landmark, current: &Landmark, alpha: f32) -> Landmark {
    let mix = |p: f32, c: f32| p * alpha + c * (1.0 - alpha);

    // Depth only blends when both frames carry it
    let z = match (prev.z, current.z) {
        (Some(pz), Some(cz)) => Some(mix(pz, cz)),
        _ => current.z,
    };

    Landmark {
        x: mix(prev.x, current.x),
        y: mix(prev.y, current.y),
        z,
    }
}
