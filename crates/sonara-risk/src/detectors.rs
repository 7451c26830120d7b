//! Independent signal detectors.
//!
//! Each detector is a pure function (or, for the pattern scan, an absorbed
//! async call) returning a list of signals; the engine concatenates the
//! lists once. Detectors never see each other's output.

use serde::Deserialize;
use tracing::warn;

use sonara_core::ai::{CompletionClient, extract_json_array};
use sonara_core::keywords::{CRITICAL_KEYWORDS, HIGH_KEYWORDS, MEDIUM_KEYWORDS};
use sonara_core::models::audio::AudioFeatures;
use sonara_core::models::emotion::EmotionScores;
use sonara_core::models::risk::{RiskSignal, Severity, SignalKind};

/// Fixed confidences per keyword tier.
pub const CRITICAL_KEYWORD_CONFIDENCE: f64 = 0.9;
pub const HIGH_KEYWORD_CONFIDENCE: f64 = 0.75;
pub const MEDIUM_KEYWORD_CONFIDENCE: f64 = 0.6;

/// Ceiling on model-reported pattern confidence, kept below the strongest
/// local evidence so a free-text number can never outrank a critical
/// keyword match.
pub const PATTERN_CONFIDENCE_CAP: f64 = 0.9;

const KEYWORD_SOURCE: &str = "keyword-scan";
const EMOTION_SOURCE: &str = "emotion-thresholds";
const AUDIO_SOURCE: &str = "audio-thresholds";

/// Tunable cut points for the emotion and audio rules.
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub severe_sadness: f64,
    pub absent_hope: f64,
    pub acute_fear: f64,
    pub acute_anxiety: f64,
    pub depressed_mood: f64,
    pub flat_pitch_hz: f64,
    pub slowed_tempo_wpm: f64,
    pub unsteady_pitch_stddev: f64,
    pub halting_pauses_per_min: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            severe_sadness: 0.8,
            absent_hope: 0.2,
            acute_fear: 0.8,
            acute_anxiety: 0.8,
            depressed_mood: -0.7,
            flat_pitch_hz: 100.0,
            slowed_tempo_wpm: 80.0,
            unsteady_pitch_stddev: 35.0,
            halting_pauses_per_min: 12.0,
        }
    }
}

/// Scan the transcript against the tiered keyword lists.
///
/// Runs locally with no provider involvement, so these signals are
/// unaffected by AI-service availability.
pub fn keyword_signals(transcript: &str) -> Vec<RiskSignal> {
    let lower = transcript.to_lowercase();
    let tiers: [(&[&str], Severity, f64); 3] = [
        (CRITICAL_KEYWORDS, Severity::Critical, CRITICAL_KEYWORD_CONFIDENCE),
        (HIGH_KEYWORDS, Severity::High, HIGH_KEYWORD_CONFIDENCE),
        (MEDIUM_KEYWORDS, Severity::Medium, MEDIUM_KEYWORD_CONFIDENCE),
    ];

    let mut signals = Vec::new();
    for (list, severity, confidence) in tiers {
        for keyword in list {
            if lower.contains(keyword) {
                signals.push(RiskSignal {
                    kind: SignalKind::Keyword,
                    severity,
                    description: format!("transcript contains the phrase \"{keyword}\""),
                    confidence,
                    source: KEYWORD_SOURCE.to_string(),
                });
            }
        }
    }
    signals
}

/// Apply the fixed emotion-threshold rules.
pub fn emotion_signals(scores: &EmotionScores, thresholds: &RiskThresholds) -> Vec<RiskSignal> {
    let t = thresholds;
    let mut signals = Vec::new();

    if scores.sadness > t.severe_sadness && scores.hope < t.absent_hope {
        signals.push(RiskSignal {
            kind: SignalKind::Emotion,
            severity: Severity::High,
            description: "severe sadness with absent hope".to_string(),
            confidence: 0.8,
            source: EMOTION_SOURCE.to_string(),
        });
    }

    if scores.fear > t.acute_fear && scores.anxiety > t.acute_anxiety {
        signals.push(RiskSignal {
            kind: SignalKind::Emotion,
            severity: Severity::Medium,
            description: "acute fear combined with acute anxiety".to_string(),
            confidence: 0.7,
            source: EMOTION_SOURCE.to_string(),
        });
    }

    if scores.overall_mood < t.depressed_mood {
        signals.push(RiskSignal {
            kind: SignalKind::Emotion,
            severity: Severity::High,
            description: "severely depressed overall mood".to_string(),
            confidence: 0.75,
            source: EMOTION_SOURCE.to_string(),
        });
    }

    signals
}

/// Apply the fixed audio-threshold rules.
pub fn audio_signals(features: &AudioFeatures, thresholds: &RiskThresholds) -> Vec<RiskSignal> {
    let t = thresholds;
    let mut signals = Vec::new();

    if features.pitch_hz < t.flat_pitch_hz && features.tempo_wpm < t.slowed_tempo_wpm {
        signals.push(RiskSignal {
            kind: SignalKind::Audio,
            severity: Severity::Medium,
            description: "flat, markedly slowed speech".to_string(),
            confidence: 0.65,
            source: AUDIO_SOURCE.to_string(),
        });
    }

    if features.pitch_variation > t.unsteady_pitch_stddev
        && features.pause_frequency > t.halting_pauses_per_min
    {
        signals.push(RiskSignal {
            kind: SignalKind::Audio,
            severity: Severity::Medium,
            description: "unsteady pitch with halting delivery".to_string(),
            confidence: 0.6,
            source: AUDIO_SOURCE.to_string(),
        });
    }

    signals
}

const PATTERN_SYSTEM_PROMPT: &str = "\
You screen de-identified therapy transcripts for risk patterns a keyword \
scan would miss, such as indirect references to self-harm, farewell \
phrasing, or giving away possessions. Be conservative: report a pattern \
only when the transcript itself supports it. Return ONLY a JSON array \
(possibly empty) of objects with the fields severity (one of low, medium, \
high, critical), description, and confidence (0 to 1).";

#[derive(Debug, Deserialize)]
struct RawPatternSignal {
    severity: String,
    description: String,
    confidence: f64,
}

/// Ask a provider for additional pattern signals.
///
/// Failures are absorbed: a provider or parse error yields an empty list
/// and a warning, never an assessment failure.
pub async fn pattern_signals(client: &dyn CompletionClient, transcript: &str) -> Vec<RiskSignal> {
    let completion = match client.complete(PATTERN_SYSTEM_PROMPT, transcript).await {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "pattern scan failed, continuing without it");
            return Vec::new();
        }
    };

    let Some(body) = extract_json_array(&completion.text) else {
        warn!("pattern scan returned no JSON array, continuing without it");
        return Vec::new();
    };

    let raw: Vec<RawPatternSignal> = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "pattern scan response did not parse, continuing without it");
            return Vec::new();
        }
    };

    raw.into_iter()
        .filter_map(|signal| {
            let severity = match signal.severity.to_lowercase().as_str() {
                "low" => Severity::Low,
                "medium" => Severity::Medium,
                "high" => Severity::High,
                "critical" => Severity::Critical,
                other => {
                    warn!(severity = other, "pattern signal with unknown severity skipped");
                    return None;
                }
            };
            Some(RiskSignal {
                kind: SignalKind::Pattern,
                severity,
                description: signal.description,
                confidence: signal.confidence.clamp(0.0, PATTERN_CONFIDENCE_CAP),
                source: client.id().to_string(),
            })
        })
        .collect()
}
