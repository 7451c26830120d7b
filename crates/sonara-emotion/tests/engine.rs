use std::sync::Arc;

use async_trait::async_trait;

use sonara_core::ai::{AiError, Completion, CompletionClient};
use sonara_core::models::audio::AudioFeatures;
use sonara_core::models::emotion::{EmotionScores, EmotionSource};
use sonara_emotion::{EmotionEngine, parse_emotion_response};

/// Always returns the same canned response text.
struct CannedClient {
    response: String,
}

#[async_trait]
impl CompletionClient for CannedClient {
    fn id(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<Completion, AiError> {
        Ok(Completion {
            text: self.response.clone(),
            usage: None,
        })
    }
}

struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    fn id(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<Completion, AiError> {
        Err(AiError::Invocation("connection reset".into()))
    }
}

fn engine_with(response: &str) -> EmotionEngine {
    EmotionEngine::new(Arc::new(CannedClient {
        response: response.to_string(),
    }))
}

fn quiet_features() -> AudioFeatures {
    AudioFeatures {
        pitch_hz: 150.0,
        tempo_wpm: 120.0,
        pause_frequency: 4.0,
        mean_pause_ms: 800.0,
        speech_rate: 3.5,
        pitch_variation: 10.0,
        volume: 0.5,
        energy: 0.5,
    }
}

#[tokio::test]
async fn well_formed_response_is_parsed_and_returned() {
    let engine = engine_with(
        r#"{"sadness":0.8,"anxiety":0.3,"anger":0.1,"happiness":0.1,"fear":0.2,"hope":0.1,"overall_mood":-0.6}"#,
    );
    let scores = engine.detect_from_transcript("some transcript").await;
    assert!((scores.sadness - 0.8).abs() < 1e-9);
    assert!((scores.overall_mood + 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn provider_failure_yields_exact_neutral_vector() {
    let engine = EmotionEngine::new(Arc::new(FailingClient));
    let scores = engine.detect_from_transcript("anything").await;
    assert_eq!(scores, EmotionScores::neutral());
}

#[tokio::test]
async fn unparseable_response_yields_exact_neutral_vector() {
    let engine = engine_with("I'm sorry, I can't quantify emotions today.");
    let scores = engine.detect_from_transcript("anything").await;
    assert_eq!(scores, EmotionScores::neutral());
}

#[test]
fn out_of_range_scores_are_clamped_on_parse() {
    let scores = parse_emotion_response(
        r#"{"sadness":1.7,"anxiety":-0.2,"anger":0.5,"happiness":0.5,"fear":0.5,"hope":0.5,"overall_mood":-3.0}"#,
    )
    .unwrap();
    assert_eq!(scores.sadness, 1.0);
    assert_eq!(scores.anxiety, 0.0);
    assert_eq!(scores.overall_mood, -1.0);
}

#[test]
fn fenced_response_still_parses() {
    let scores = parse_emotion_response(
        "```json\n{\"sadness\":0.2,\"anxiety\":0.2,\"anger\":0.2,\"happiness\":0.6,\"fear\":0.1,\"hope\":0.7,\"overall_mood\":0.4}\n```",
    )
    .unwrap();
    assert!((scores.hope - 0.7).abs() < 1e-9);
}

#[test]
fn missing_field_is_a_schema_violation() {
    let err = parse_emotion_response(r#"{"sadness":0.5}"#).unwrap_err();
    assert!(matches!(err, AiError::SchemaViolation(_)));
}

#[test]
fn audio_mood_follows_the_pitch_tempo_formula() {
    let engine = engine_with("{}");
    let features = quiet_features();
    let scores = engine.detect_from_audio(&features);

    // normalized pitch = (150-85)/170, normalized tempo = 120/180.
    let expected = 2.0 * (0.6 * (65.0 / 170.0) + 0.4 * (120.0 / 180.0)) - 1.0;
    assert!((scores.overall_mood - expected).abs() < 1e-9);
    // Audio carries no evidence about hope.
    assert_eq!(scores.hope, 0.5);
}

#[tokio::test]
async fn hybrid_merges_with_fixed_weights() {
    let engine = engine_with(
        r#"{"sadness":1.0,"anxiety":0.0,"anger":0.0,"happiness":0.0,"fear":0.0,"hope":0.0,"overall_mood":0.0}"#,
    );
    let result = engine
        .detect_hybrid("transcript", Some(&quiet_features()))
        .await;

    assert_eq!(result.source, EmotionSource::Hybrid);
    assert!((result.confidence - 0.85).abs() < 1e-9);
    // Audio sadness is at baseline 0.2, transcript at 1.0 -> 0.7*1.0 + 0.3*0.2.
    assert!((result.scores.sadness - 0.76).abs() < 1e-9);
}

#[tokio::test]
async fn transcript_only_uses_lower_fixed_confidence() {
    let engine = engine_with(
        r#"{"sadness":0.5,"anxiety":0.5,"anger":0.5,"happiness":0.5,"fear":0.5,"hope":0.5,"overall_mood":0.0}"#,
    );
    let result = engine.detect_hybrid("transcript", None).await;
    assert_eq!(result.source, EmotionSource::Transcript);
    assert!((result.confidence - 0.75).abs() < 1e-9);
}

#[test]
fn merged_vectors_stay_in_domain() {
    let a = EmotionScores {
        sadness: 1.0,
        anxiety: 1.0,
        anger: 1.0,
        happiness: 1.0,
        fear: 1.0,
        hope: 1.0,
        overall_mood: 1.0,
    };
    let merged = a.merge_weighted(a, 0.7, 0.5);
    assert!(merged.sadness <= 1.0);
    assert!(merged.overall_mood <= 1.0);

    let again = merged.merge_weighted(merged, 0.7, 0.3);
    assert!(again.sadness <= 1.0 && again.sadness >= 0.0);
}
