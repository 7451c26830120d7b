use std::sync::Arc;

use tracing::info;

use sonara_core::ai::CompletionClient;
use sonara_core::models::audio::AudioFeatures;
use sonara_core::models::emotion::EmotionScores;
use sonara_core::models::risk::{RiskAssessment, RiskLevel};
use sonara_emotion::EmotionEngine;

use crate::detectors::{
    RiskThresholds, audio_signals, emotion_signals, keyword_signals, pattern_signals,
};
use crate::score::{
    aggregate_score, level_for_score, mean_confidence, recommendations_for, suppress,
};

/// Transcripts at or below this length skip the pattern scan unless a local
/// detector already fired — no model call for trivially short, signal-free
/// text.
pub const PATTERN_SCAN_MIN_CHARS: usize = 100;

/// Risk fusion over the emotion engine and an injected provider.
pub struct RiskEngine {
    emotion: Arc<EmotionEngine>,
    client: Arc<dyn CompletionClient>,
    thresholds: RiskThresholds,
}

impl RiskEngine {
    pub fn new(emotion: Arc<EmotionEngine>, client: Arc<dyn CompletionClient>) -> Self {
        Self::with_thresholds(emotion, client, RiskThresholds::default())
    }

    pub fn with_thresholds(
        emotion: Arc<EmotionEngine>,
        client: Arc<dyn CompletionClient>,
        thresholds: RiskThresholds,
    ) -> Self {
        Self {
            emotion,
            client,
            thresholds,
        }
    }

    /// Assess a de-identified transcript, with optional precomputed
    /// emotions and audio features.
    ///
    /// Always returns a well-formed assessment: emotion detection fails
    /// closed to neutral and the pattern scan absorbs provider failures, so
    /// locally derived keyword evidence is never lost to an outage.
    pub async fn assess(
        &self,
        transcript: &str,
        emotions: Option<EmotionScores>,
        audio: Option<&AudioFeatures>,
    ) -> RiskAssessment {
        let keyword = keyword_signals(transcript);

        let scores = match emotions {
            Some(scores) => scores,
            None => self.emotion.detect_from_transcript(transcript).await,
        };
        let emotion = emotion_signals(&scores, &self.thresholds);

        let audio_derived = audio
            .map(|features| audio_signals(features, &self.thresholds))
            .unwrap_or_default();

        let local = [keyword, emotion, audio_derived].concat();

        let pattern = if !local.is_empty() || transcript.chars().count() > PATTERN_SCAN_MIN_CHARS {
            pattern_signals(self.client.as_ref(), transcript).await
        } else {
            Vec::new()
        };

        let signals = [local, pattern].concat();

        let raw_score = aggregate_score(&signals);
        let (risk_level, risk_score) = suppress(level_for_score(raw_score), raw_score, &signals);

        info!(
            signal_count = signals.len(),
            raw_score,
            risk_score,
            level = risk_level.as_str(),
            "risk assessment complete"
        );

        RiskAssessment {
            risk_level,
            risk_score,
            confidence: mean_confidence(&signals),
            requires_immediate_attention: risk_level == RiskLevel::Critical,
            recommendations: recommendations_for(risk_level),
            signals,
            created_at: jiff::Timestamp::now(),
        }
    }
}
