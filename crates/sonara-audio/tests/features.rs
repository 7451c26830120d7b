use sonara_audio::features::{DEFAULT_PITCH_HZ, features_from_transcript};
use sonara_audio::indicators::{IndicatorThresholds, extract_emotion_indicators};

#[test]
fn tempo_is_words_per_minute() {
    // 30 words over 30 seconds -> 60 wpm.
    let text = "word ".repeat(30);
    let features = features_from_transcript(&text, 30_000);
    assert!((features.tempo_wpm - 60.0).abs() < 1e-9);
}

#[test]
fn pauses_follow_sentence_punctuation() {
    // 4 terminal marks over 2 minutes -> 2 pauses/min, 30s mean spacing.
    let text = "One. Two. Three! Four?";
    let features = features_from_transcript(text, 120_000);
    assert!((features.pause_frequency - 2.0).abs() < 1e-9);
    assert!((features.mean_pause_ms - 30_000.0).abs() < 1e-9);
}

#[test]
fn no_punctuation_means_no_pauses() {
    let features = features_from_transcript("just words no stops", 60_000);
    assert_eq!(features.pause_frequency, 0.0);
    assert_eq!(features.mean_pause_ms, 0.0);
}

#[test]
fn speech_rate_counts_vowel_clusters() {
    // "hello there" -> hello: e,o = 2 clusters; there: e,e = 2 clusters.
    let features = features_from_transcript("hello there", 1_000);
    assert!((features.speech_rate - 4.0).abs() < 1e-9);
}

#[test]
fn vowelless_words_still_count_one_syllable() {
    let features = features_from_transcript("hmm", 1_000);
    assert!((features.speech_rate - 1.0).abs() < 1e-9);
}

#[test]
fn estimate_uses_default_pitch() {
    let features = features_from_transcript("some text", 5_000);
    assert_eq!(features.pitch_hz, DEFAULT_PITCH_HZ);
    assert_eq!(features.pitch_variation, 0.0);
}

#[test]
fn flat_slow_halting_speech_reads_as_sadness() {
    let mut features = features_from_transcript("short. words. only.", 10_000);
    features.pitch_hz = 100.0;
    features.tempo_wpm = 80.0;
    features.pause_frequency = 12.0;

    let indicators = extract_emotion_indicators(&features, &IndicatorThresholds::default());
    assert!((indicators.sadness - 0.7).abs() < 1e-9);
}

#[test]
fn strained_rushed_speech_reads_as_anxiety() {
    let mut features = features_from_transcript("lots of rapid speech", 10_000);
    features.pitch_hz = 230.0;
    features.tempo_wpm = 180.0;

    let indicators = extract_emotion_indicators(&features, &IndicatorThresholds::default());
    assert!((indicators.anxiety - 0.7).abs() < 1e-9);
}

#[test]
fn neutral_features_stay_at_baseline() {
    let mut features = features_from_transcript("ordinary session text here", 60_000);
    features.pitch_hz = 150.0;
    features.tempo_wpm = 120.0;
    features.pause_frequency = 4.0;
    features.energy = 0.5;

    let indicators = extract_emotion_indicators(&features, &IndicatorThresholds::default());
    assert!(indicators.sadness < 0.5);
    assert!(indicators.anxiety < 0.5);
    assert!(indicators.anger < 0.5);
    assert!(indicators.fear < 0.5);
}
