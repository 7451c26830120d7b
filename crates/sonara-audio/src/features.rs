//! Transcript-based feature estimation.
//!
//! When no raw audio is available, features are approximated from the text
//! and the elapsed session duration: tempo from word count, speech rate from
//! vowel-cluster syllable counts, pauses from sentence-terminal punctuation
//! with the duration distributed evenly across them. Pitch cannot be
//! estimated from text; the defaults below stand in until a capture session
//! supplies real samples.

use sonara_core::models::audio::AudioFeatures;

/// Mid-range speaking pitch used when no audio samples exist.
pub const DEFAULT_PITCH_HZ: f64 = 150.0;
pub const DEFAULT_VOLUME: f64 = 0.5;
pub const DEFAULT_ENERGY: f64 = 0.5;

/// Estimate features from a transcript and the elapsed duration.
pub fn features_from_transcript(text: &str, duration_ms: u64) -> AudioFeatures {
    let duration_ms = duration_ms.max(1) as f64;

    let word_count = text.split_whitespace().count() as f64;
    let syllables = count_syllables(text) as f64;
    let pauses = count_pauses(text) as f64;

    let minutes = duration_ms / 60_000.0;
    let tempo_wpm = word_count / duration_ms * 60_000.0;
    let speech_rate = syllables / duration_ms * 1_000.0;
    let pause_frequency = pauses / minutes;
    let mean_pause_ms = if pauses > 0.0 { duration_ms / pauses } else { 0.0 };

    AudioFeatures {
        pitch_hz: DEFAULT_PITCH_HZ,
        tempo_wpm,
        pause_frequency,
        mean_pause_ms,
        speech_rate,
        pitch_variation: 0.0,
        volume: DEFAULT_VOLUME,
        energy: DEFAULT_ENERGY,
    }
}

/// Approximate syllables by counting vowel clusters, at least one per word.
fn count_syllables(text: &str) -> usize {
    text.split_whitespace()
        .map(|word| {
            let mut clusters = 0;
            let mut in_vowel = false;
            let mut has_alpha = false;
            for c in word.chars() {
                if c.is_alphabetic() {
                    has_alpha = true;
                }
                let vowel = matches!(
                    c.to_ascii_lowercase(),
                    'a' | 'e' | 'i' | 'o' | 'u' | 'y'
                );
                if vowel && !in_vowel {
                    clusters += 1;
                }
                in_vowel = vowel;
            }
            if has_alpha { clusters.max(1) } else { 0 }
        })
        .sum()
}

/// Sentence-terminal punctuation marks stand in for pauses.
fn count_pauses(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}
