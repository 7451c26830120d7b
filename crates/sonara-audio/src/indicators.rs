//! Rule-based mapping from paralinguistic features to coarse emotion
//! indicators.
//!
//! Intentionally simple threshold rules, not a trained classifier. The
//! thresholds are configuration, not control flow — tune them through
//! [`IndicatorThresholds`] without touching the rules.

use sonara_core::models::audio::AudioFeatures;

const STRONG: f64 = 0.7;
const MODERATE: f64 = 0.6;
const MILD: f64 = 0.5;
const BASELINE: f64 = 0.2;

/// Tunable cut points for the indicator rules.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorThresholds {
    /// Below this pitch speech reads as flat.
    pub low_pitch_hz: f64,
    /// Below this tempo speech reads as slowed.
    pub slow_tempo_wpm: f64,
    /// Above this many pauses per minute speech reads as halting.
    pub frequent_pauses_per_min: f64,
    /// Above this pitch speech reads as strained.
    pub high_pitch_hz: f64,
    /// Above this tempo speech reads as rushed.
    pub fast_tempo_wpm: f64,
    /// Above this tempo speech reads as pressured.
    pub pressured_tempo_wpm: f64,
    /// Pitch stddev above which the voice reads as unsteady.
    pub unsteady_pitch_stddev: f64,
    /// Pause rate above which speech reads as tense.
    pub tense_pauses_per_min: f64,
    /// Pitch above which strain reads as fearful.
    pub fearful_pitch_hz: f64,
    /// Energy above which speech reads as charged.
    pub raised_energy: f64,
    /// Energy above which speech reads as bright.
    pub bright_energy: f64,
    /// Inclusive pitch band of relaxed, warm speech.
    pub warm_pitch_hz: (f64, f64),
    /// Inclusive tempo band of relaxed, warm speech.
    pub warm_tempo_wpm: (f64, f64),
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            low_pitch_hz: 120.0,
            slow_tempo_wpm: 100.0,
            frequent_pauses_per_min: 10.0,
            high_pitch_hz: 200.0,
            fast_tempo_wpm: 160.0,
            pressured_tempo_wpm: 140.0,
            unsteady_pitch_stddev: 35.0,
            tense_pauses_per_min: 12.0,
            fearful_pitch_hz: 220.0,
            raised_energy: 0.75,
            bright_energy: 0.6,
            warm_pitch_hz: (140.0, 200.0),
            warm_tempo_wpm: (110.0, 160.0),
        }
    }
}

/// Coarse five-dimension emotion estimate from audio alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioEmotionIndicators {
    pub sadness: f64,
    pub anxiety: f64,
    pub anger: f64,
    pub happiness: f64,
    pub fear: f64,
}

/// Apply the threshold rules to one feature window.
pub fn extract_emotion_indicators(
    features: &AudioFeatures,
    thresholds: &IndicatorThresholds,
) -> AudioEmotionIndicators {
    let t = thresholds;
    let mut indicators = AudioEmotionIndicators {
        sadness: BASELINE,
        anxiety: BASELINE,
        anger: BASELINE,
        happiness: BASELINE,
        fear: BASELINE,
    };

    if features.pitch_hz < t.low_pitch_hz
        && features.tempo_wpm < t.slow_tempo_wpm
        && features.pause_frequency > t.frequent_pauses_per_min
    {
        indicators.sadness = STRONG;
    }

    if features.pitch_hz > t.high_pitch_hz && features.tempo_wpm > t.fast_tempo_wpm {
        indicators.anxiety = STRONG;
    } else if features.pitch_variation > t.unsteady_pitch_stddev {
        indicators.anxiety = MILD;
    }

    if features.energy > t.raised_energy && features.tempo_wpm > t.pressured_tempo_wpm {
        indicators.anger = MODERATE;
    }

    if features.pitch_hz > t.fearful_pitch_hz
        && features.pause_frequency > t.tense_pauses_per_min
    {
        indicators.fear = MODERATE;
    }

    let (pitch_lo, pitch_hi) = t.warm_pitch_hz;
    let (tempo_lo, tempo_hi) = t.warm_tempo_wpm;
    if features.energy > t.bright_energy
        && (pitch_lo..=pitch_hi).contains(&features.pitch_hz)
        && (tempo_lo..=tempo_hi).contains(&features.tempo_wpm)
    {
        indicators.happiness = MODERATE;
    }

    indicators
}
