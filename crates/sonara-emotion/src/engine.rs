use std::sync::Arc;

use tracing::{info, warn};

use sonara_audio::indicators::{IndicatorThresholds, extract_emotion_indicators};
use sonara_audio::stream::{MAX_VOICE_HZ, MIN_VOICE_HZ};
use sonara_core::ai::{AiError, CompletionClient};
use sonara_core::models::audio::AudioFeatures;
use sonara_core::models::emotion::{EmotionDetectionResult, EmotionScores, EmotionSource};

/// Fixed merge weights for the hybrid path.
pub const TRANSCRIPT_WEIGHT: f64 = 0.7;
pub const AUDIO_WEIGHT: f64 = 0.3;

/// Per-mode confidences. Constants by design, not derived from signal
/// agreement; callers must not over-interpret them.
pub const HYBRID_CONFIDENCE: f64 = 0.85;
pub const TRANSCRIPT_CONFIDENCE: f64 = 0.75;

/// Overall-mood formula weights and tempo normalization ceiling.
pub const MOOD_PITCH_WEIGHT: f64 = 0.6;
pub const MOOD_TEMPO_WEIGHT: f64 = 0.4;
pub const TEMPO_NORM_WPM: f64 = 180.0;

const EMOTION_SYSTEM_PROMPT: &str = "\
You analyze the emotional content of a de-identified therapy session transcript. \
Return ONLY a JSON object with the fields sadness, anxiety, anger, happiness, \
fear and hope, each a number between 0 and 1, and overall_mood, a number \
between -1 and 1. Do not add commentary or formatting.";

/// Emotion inference over an injected completion provider.
pub struct EmotionEngine {
    client: Arc<dyn CompletionClient>,
    thresholds: IndicatorThresholds,
}

impl EmotionEngine {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::with_thresholds(client, IndicatorThresholds::default())
    }

    pub fn with_thresholds(client: Arc<dyn CompletionClient>, thresholds: IndicatorThresholds) -> Self {
        Self { client, thresholds }
    }

    /// Detect emotions from a de-identified transcript.
    ///
    /// Fails closed: any provider or parse failure yields the neutral
    /// vector, never an error and never an extreme reading.
    pub async fn detect_from_transcript(&self, transcript: &str) -> EmotionScores {
        match self.request_scores(transcript).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!(error = %e, "emotion detection failed, returning neutral vector");
                EmotionScores::neutral()
            }
        }
    }

    async fn request_scores(&self, transcript: &str) -> Result<EmotionScores, AiError> {
        let completion = self
            .client
            .complete(EMOTION_SYSTEM_PROMPT, transcript)
            .await?;
        let scores = crate::parse::parse_emotion_response(&completion.text)?;
        info!(provider = self.client.id(), "transcript emotion detection complete");
        Ok(scores)
    }

    /// Pure function of the audio features: indicator rules for the five
    /// audio-visible dimensions, neutral hope (audio carries no evidence
    /// for it), and the overall-mood formula.
    pub fn detect_from_audio(&self, features: &AudioFeatures) -> EmotionScores {
        let indicators = extract_emotion_indicators(features, &self.thresholds);

        let normalized_pitch =
            ((features.pitch_hz - MIN_VOICE_HZ) / (MAX_VOICE_HZ - MIN_VOICE_HZ)).clamp(0.0, 1.0);
        let normalized_tempo = (features.tempo_wpm / TEMPO_NORM_WPM).clamp(0.0, 1.0);
        let mood =
            2.0 * (MOOD_PITCH_WEIGHT * normalized_pitch + MOOD_TEMPO_WEIGHT * normalized_tempo)
                - 1.0;

        EmotionScores {
            sadness: indicators.sadness,
            anxiety: indicators.anxiety,
            anger: indicators.anger,
            happiness: indicators.happiness,
            fear: indicators.fear,
            hope: 0.5,
            overall_mood: mood,
        }
        .clamped()
    }

    /// Transcript detection fused with audio when present, transcript-only
    /// otherwise.
    pub async fn detect_hybrid(
        &self,
        transcript: &str,
        audio: Option<&AudioFeatures>,
    ) -> EmotionDetectionResult {
        let transcript_scores = self.detect_from_transcript(transcript).await;

        match audio {
            Some(features) => {
                let audio_scores = self.detect_from_audio(features);
                EmotionDetectionResult {
                    scores: transcript_scores.merge_weighted(
                        audio_scores,
                        TRANSCRIPT_WEIGHT,
                        AUDIO_WEIGHT,
                    ),
                    source: EmotionSource::Hybrid,
                    confidence: HYBRID_CONFIDENCE,
                }
            }
            None => EmotionDetectionResult {
                scores: transcript_scores,
                source: EmotionSource::Transcript,
                confidence: TRANSCRIPT_CONFIDENCE,
            },
        }
    }
}
