//! Rolling gesture history for majority-vote debouncing
//!
//! Stores the last 5 per-frame labels and reports the most frequent one.

use super::model::Gesture;

/// Number of frames in the voting window
pub const HISTORY_SIZE: usize = 5;

/// Ring buffer of recent labels in chronological order
#[derive(Debug)]
pub struct GestureHistory {
    /// Circular buffer data
    data: [Option<Gesture>; HISTORY_SIZE],

    /// Current write position (points to next slot to write)
    write_index: usize,

    /// Whether buffer has wrapped at least once
    filled: bool,
}

impl GestureHistory {
    pub fn new() -> Self {
        Self {
            data: [None; HISTORY_SIZE],
            write_index: 0,
            filled: false,
        }
    }

    /// Push a raw label and return the debounced one
    pub fn push(&mut self, gesture: Gesture) -> Gesture {
        self.data[self.write_index] = Some(gesture);
        self.write_index = (self.write_index + 1) % HISTORY_SIZE;

        if self.write_index == 0 {
            self.filled = true;
        }

        self.majority().unwrap_or(gesture)
    }

    /// Most frequent label in the window
    ///
    /// Counts are folded oldest to newest; on a tie the label seen first
    /// wins, not the most recent one.
    pub fn majority(&self) -> Option<Gesture> {
        let mut counts: Vec<(Gesture, usize)> = Vec::with_capacity(HISTORY_SIZE);
        for gesture in self.iter() {
            match counts.iter_mut().find(|(g, _)| *g == gesture) {
                Some((_, n)) => *n += 1,
                None => counts.push((gesture, 1)),
            }
        }

        let mut best: Option<(Gesture, usize)> = None;
        for (gesture, n) in counts {
            if best.is_none_or(|(_, best_n)| n > best_n) {
                best = Some((gesture, n));
            }
        }
        best.map(|(gesture, _)| gesture)
    }

    /// Labels oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Gesture> + '_ {
        let start = if self.filled { self.write_index } else { 0 };
        (0..self.len()).filter_map(move |i| self.data[(start + i) % HISTORY_SIZE])
    }

    pub fn len(&self) -> usize {
        if self.filled {
            HISTORY_SIZE
        } else {
            self.write_index
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear the buffer (tracking restart)
    pub fn clear(&mut self) {
        self.data = [None; HISTORY_SIZE];
        self.write_index = 0;
        self.filled = false;
    }
}

impl Default for GestureHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_push_returns_itself() {
        let mut history = GestureHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.push(Gesture::Pointing), Gesture::Pointing);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_same_label_is_idempotent() {
        let mut history = GestureHistory::new();
        for _ in 0..HISTORY_SIZE {
            assert_eq!(history.push(Gesture::Fist), Gesture::Fist);
        }
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let mut history = GestureHistory::new();
        let sequence = [
            Gesture::OpenHand,
            Gesture::Fist,
            Gesture::OpenHand,
            Gesture::Fist,
            Gesture::PeaceSign,
        ];
        let mut out = Gesture::NoHands;
        for g in sequence {
            out = history.push(g);
        }
        assert_eq!(out, Gesture::OpenHand);
    }

    #[test]
    fn test_tie_is_not_most_recent() {
        let mut history = GestureHistory::new();
        history.push(Gesture::ThumbsUp);
        assert_eq!(history.push(Gesture::CallMe), Gesture::ThumbsUp);
    }

    #[test]
    fn test_oldest_evicted() {
        let mut history = GestureHistory::new();
        for _ in 0..3 {
            history.push(Gesture::Fist);
        }
        for _ in 0..2 {
            history.push(Gesture::OpenHand);
        }
        assert_eq!(history.majority(), Some(Gesture::Fist));

        // Sixth push evicts the first Fist: Fist=2, OpenHand=3
        assert_eq!(history.push(Gesture::OpenHand), Gesture::OpenHand);
        assert_eq!(history.len(), HISTORY_SIZE);
        let window: Vec<Gesture> = history.iter().collect();
        assert_eq!(
            window,
            vec![Gesture::Fist, Gesture::Fist, Gesture::OpenHand, Gesture::OpenHand, Gesture::OpenHand]
        );
    }

    #[test]
    fn test_tie_break_follows_window_order_after_wrap() {
        let mut history = GestureHistory::new();
        // After eviction the window is [B, A, B, A, C]: B is older
        for g in [
            Gesture::Fingers(3),
            Gesture::RockSign,
            Gesture::Pointing,
            Gesture::RockSign,
            Gesture::Pointing,
            Gesture::OkSign,
        ] {
            history.push(g);
        }
        assert_eq!(history.majority(), Some(Gesture::RockSign));
    }

    #[test]
    fn test_clear() {
        let mut history = GestureHistory::new();
        for _ in 0..7 {
            history.push(Gesture::Fist);
        }
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.majority(), None);
        assert_eq!(history.push(Gesture::Uncertain), Gesture::Uncertain);
    }
}
