use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use sonara_audit::AccessEvent;
use sonara_core::models::audio::AudioFeatures;
use sonara_core::models::emotion::EmotionDetectionResult;
use sonara_core::validate::validate_transcript;
use sonara_shield::DeidSession;

use crate::error::ApiError;
use crate::middleware::auth::UserSub;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EmotionRequest {
    pub transcript: String,
    pub audio: Option<AudioFeatures>,
    pub session_id: Option<Uuid>,
}

/// Detect an emotion vector for a session transcript, fused with audio
/// features when supplied.
pub async fn detect_emotion(
    State(state): State<AppState>,
    Extension(user): Extension<UserSub>,
    Json(req): Json<EmotionRequest>,
) -> Result<Json<EmotionDetectionResult>, ApiError> {
    validate_transcript(&req.transcript)?;

    let mut session = DeidSession::new();
    let scrubbed = session.scrub(&req.transcript);

    state.audit.log_access(
        &AccessEvent::new(
            "emotion_detection",
            "session_transcript",
            resource_id(req.session_id),
            user.0.as_str(),
        )
        .with_details(serde_json::json!({ "replacements": session.map().len() })),
    );

    // The result is purely numeric, so nothing needs re-identification.
    let result = state.emotion.detect_hybrid(&scrubbed, req.audio.as_ref()).await;
    Ok(Json(result))
}

pub(crate) fn resource_id(session_id: Option<Uuid>) -> String {
    session_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "ad-hoc".to_string())
}
