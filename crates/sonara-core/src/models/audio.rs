use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Paralinguistic features for one analysis window.
///
/// Derived from a live capture session or estimated from a transcript plus
/// elapsed duration when no raw audio is available. Ephemeral — never
/// persisted beyond the session that computed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AudioFeatures {
    /// Dominant pitch in Hz.
    pub pitch_hz: f64,
    /// Speaking tempo in words per minute.
    pub tempo_wpm: f64,
    /// Pauses per minute.
    pub pause_frequency: f64,
    /// Mean pause duration in milliseconds.
    pub mean_pause_ms: f64,
    /// Speech rate in syllables per second.
    pub speech_rate: f64,
    /// Sample standard deviation of recent pitch, in Hz.
    pub pitch_variation: f64,
    /// Normalized volume, `[0, 1]`.
    pub volume: f64,
    /// Normalized energy, `[0, 1]`.
    pub energy: f64,
}
