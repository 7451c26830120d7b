//! Strict parsing of the model's emotion response.
//!
//! The prompt instructs the model to return a bare JSON object; in practice
//! responses sometimes arrive wrapped in prose or code fences, so the parser
//! extracts the outermost object before deserializing. Anything that does
//! not deserialize into the full score shape is a schema violation — the
//! caller decides what to do with it (the engine falls back to neutral).

use serde::Deserialize;

use sonara_core::ai::{AiError, extract_json_object};
use sonara_core::models::emotion::EmotionScores;

#[derive(Debug, Deserialize)]
struct RawEmotionScores {
    sadness: f64,
    anxiety: f64,
    anger: f64,
    happiness: f64,
    fear: f64,
    hope: f64,
    overall_mood: f64,
}

/// Parse a model response into clamped [`EmotionScores`].
pub fn parse_emotion_response(text: &str) -> Result<EmotionScores, AiError> {
    let body = extract_json_object(text).ok_or_else(|| {
        AiError::ResponseParse(format!("no JSON object in emotion response: {text}"))
    })?;

    let raw: RawEmotionScores = serde_json::from_str(body).map_err(|e| {
        AiError::SchemaViolation(format!("failed to parse EmotionScores: {e}. Response: {text}"))
    })?;

    Ok(EmotionScores {
        sadness: raw.sadness,
        anxiety: raw.anxiety,
        anger: raw.anger,
        happiness: raw.happiness,
        fear: raw.fear,
        hope: raw.hope,
        overall_mood: raw.overall_mood,
    }
    .clamped())
}
