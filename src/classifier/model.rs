//! Gesture vocabulary and per-frame classification output

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// Gesture labels, in classifier priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Fist,
    OpenHand,
    Pointing,
    PeaceSign,
    ThumbsUp,
    OkSign,
    RockSign,
    CallMe,
    /// Fallback: number of extended fingers
    Fingers(u8),
    /// Best match fell below the sensitivity threshold
    Uncertain,
    /// Detector returned no hands this frame
    NoHands,
}

impl Gesture {
    /// Display label shown to the user
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Gesture::Fist => Cow::Borrowed("Fist"),
            Gesture::OpenHand => Cow::Borrowed("Open Hand"),
            Gesture::Pointing => Cow::Borrowed("Pointing"),
            Gesture::PeaceSign => Cow::Borrowed("Peace Sign"),
            Gesture::ThumbsUp => Cow::Borrowed("Thumbs Up"),
            Gesture::OkSign => Cow::Borrowed("OK Sign"),
            Gesture::RockSign => Cow::Borrowed("Rock Sign"),
            Gesture::CallMe => Cow::Borrowed("Call Me"),
            Gesture::Fingers(1) => Cow::Borrowed("1 Finger"),
            Gesture::Fingers(n) => Cow::Owned(format!("{} Fingers", n)),
            Gesture::Uncertain => Cow::Borrowed("Uncertain"),
            Gesture::NoHands => Cow::Borrowed("No hands detected"),
        }
    }

    /// False for the two sentinel results
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Gesture::Uncertain | Gesture::NoHands)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Gesture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// A gesture with its confidence in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub gesture: Gesture,
    pub confidence: f32,
}

impl Classification {
    /// NaN confidence is treated as 0
    pub fn new(gesture: Gesture, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { gesture, confidence }
    }

    pub fn uncertain() -> Self {
        Self::new(Gesture::Uncertain, 0.0)
    }

    pub fn no_hands() -> Self {
        Self::new(Gesture::NoHands, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds() {
        assert_eq!(Classification::new(Gesture::Fist, 1.7).confidence, 1.0);
        assert_eq!(Classification::new(Gesture::Fist, -0.2).confidence, 0.0);
        assert_eq!(Classification::new(Gesture::Fist, f32::NAN).confidence, 0.0);
        assert_eq!(Classification::new(Gesture::Fist, f32::INFINITY).confidence, 1.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Gesture::OpenHand.label(), "Open Hand");
        assert_eq!(Gesture::OkSign.to_string(), "OK Sign");
        assert_eq!(Gesture::NoHands.label(), "No hands detected");
        assert_eq!(Gesture::Fingers(1).label(), "1 Finger");
        assert_eq!(Gesture::Fingers(3).label(), "3 Fingers");
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Classification::new(Gesture::PeaceSign, 0.8)).unwrap();
        assert_eq!(json, r#"{"gesture":"Peace Sign","confidence":0.8}"#);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Classification::new(Gesture::Fist, 1.7).confidence, 1.0);
        assert_eq!(Classification::new(Gesture::Fist, -0.3).confidence, 0.0);
    }

    #[test]
    fn test_sentinels_not_recognized() {
        assert!(!Gesture::Uncertain.is_recognized());
        assert!(!Gesture::NoHands.is_recognized());
        assert!(Gesture::Fingers(2).is_recognized());
    }
}
