use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Six bounded emotion dimensions plus an overall mood scalar.
///
/// Dimensions lie in `[0, 1]` and `overall_mood` in `[-1, 1]`. Producers
/// call [`EmotionScores::clamped`] before returning a value, so no field is
/// ever `NaN` or out of range at a crate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmotionScores {
    pub sadness: f64,
    pub anxiety: f64,
    pub anger: f64,
    pub happiness: f64,
    pub fear: f64,
    pub hope: f64,
    pub overall_mood: f64,
}

impl EmotionScores {
    /// The fail-closed value: `0.5` on every dimension, neutral mood.
    ///
    /// Emotion detection degrades to this vector on any provider or parse
    /// failure so that a broken model call can never manufacture an extreme
    /// reading.
    pub fn neutral() -> Self {
        Self {
            sadness: 0.5,
            anxiety: 0.5,
            anger: 0.5,
            happiness: 0.5,
            fear: 0.5,
            hope: 0.5,
            overall_mood: 0.0,
        }
    }

    /// Clamp every field into its domain. `NaN` falls back to the neutral
    /// value for that field.
    pub fn clamped(self) -> Self {
        Self {
            sadness: clamp_unit(self.sadness),
            anxiety: clamp_unit(self.anxiety),
            anger: clamp_unit(self.anger),
            happiness: clamp_unit(self.happiness),
            fear: clamp_unit(self.fear),
            hope: clamp_unit(self.hope),
            overall_mood: clamp_mood(self.overall_mood),
        }
    }

    /// Weighted merge of two vectors, clamped.
    pub fn merge_weighted(self, other: Self, self_weight: f64, other_weight: f64) -> Self {
        Self {
            sadness: self.sadness * self_weight + other.sadness * other_weight,
            anxiety: self.anxiety * self_weight + other.anxiety * other_weight,
            anger: self.anger * self_weight + other.anger * other_weight,
            happiness: self.happiness * self_weight + other.happiness * other_weight,
            fear: self.fear * self_weight + other.fear * other_weight,
            hope: self.hope * self_weight + other.hope * other_weight,
            overall_mood: self.overall_mood * self_weight + other.overall_mood * other_weight,
        }
        .clamped()
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}

fn clamp_mood(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

/// Which inputs produced a detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EmotionSource {
    Transcript,
    Audio,
    Hybrid,
}

/// An emotion vector with its provenance and a fixed per-mode confidence.
///
/// The confidence is a constant per detection mode, not a measure of signal
/// agreement — callers must not over-interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmotionDetectionResult {
    pub scores: EmotionScores,
    pub source: EmotionSource,
    pub confidence: f64,
}
