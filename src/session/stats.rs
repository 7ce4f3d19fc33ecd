//! Session statistics for the display panel
//!
//! Aggregates the emitted result stream: totals, per-gesture counts,
//! recent history and average confidence.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use super::pipeline::GestureResult;

/// Recognized results kept for the history list
pub const RECENT_CAPACITY: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsEntry {
    pub gesture: String,
    pub confidence: f32,
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Every recorded frame, sentinels included
    pub total_frames: u64,
    /// Frames with a recognized gesture
    pub total_detections: u64,
    pub gesture_counts: BTreeMap<String, u64>,
    /// Newest last
    pub recent: VecDeque<StatsEntry>,
    #[serde(skip)]
    confidence_sum: f64,
    /// Label that first reached each count, for stable tie-breaking
    #[serde(skip)]
    leader: Option<(String, u64)>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &GestureResult, timestamp_ms: f64) {
        self.total_frames += 1;
        if !result.gesture.is_recognized() {
            return;
        }

        let label = result.gesture.label().into_owned();
        self.total_detections += 1;
        self.confidence_sum += f64::from(result.confidence);

        let count = self.gesture_counts.entry(label.clone()).or_insert(0);
        *count += 1;
        let count = *count;
        if self.leader.as_ref().is_none_or(|(_, best)| count > *best) {
            self.leader = Some((label.clone(), count));
        }

        self.recent.push_back(StatsEntry {
            gesture: label,
            confidence: result.confidence,
            timestamp_ms,
        });
        if self.recent.len() > RECENT_CAPACITY {
            self.recent.pop_front();
        }
    }

    /// Mean confidence over recognized gestures, 0 if none
    pub fn average_confidence(&self) -> f32 {
        if self.total_detections == 0 {
            0.0
        } else {
            (self.confidence_sum / self.total_detections as f64) as f32
        }
    }

    pub fn most_common(&self) -> Option<&str> {
        self.leader.as_ref().map(|(label, _)| label.as_str())
    }

    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Summary<'a> {
            #[serde(flatten)]
            stats: &'a SessionStats,
            average_confidence: f32,
            most_common: Option<&'a str>,
        }

        let summary = Summary {
            stats: self,
            average_confidence: self.average_confidence(),
            most_common: self.most_common(),
        };
        serde_json::to_string(&summary).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
