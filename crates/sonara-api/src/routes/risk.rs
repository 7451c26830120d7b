use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use sonara_audit::AccessEvent;
use sonara_core::models::audio::AudioFeatures;
use sonara_core::models::emotion::EmotionScores;
use sonara_core::models::risk::RiskAssessment;
use sonara_core::validate::validate_transcript;
use sonara_shield::{DeidSession, reidentify_value};

use crate::error::ApiError;
use crate::middleware::auth::UserSub;
use crate::routes::emotion::resource_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RiskRequest {
    pub transcript: String,
    pub emotions: Option<EmotionScores>,
    pub audio: Option<AudioFeatures>,
    pub session_id: Option<Uuid>,
}

/// Run a full risk assessment over a session transcript.
pub async fn assess_risk(
    State(state): State<AppState>,
    Extension(user): Extension<UserSub>,
    Json(req): Json<RiskRequest>,
) -> Result<Json<RiskAssessment>, ApiError> {
    validate_transcript(&req.transcript)?;

    let mut session = DeidSession::new();
    let scrubbed = session.scrub(&req.transcript);

    state.audit.log_access(
        &AccessEvent::new(
            "risk_assessment",
            "session_transcript",
            resource_id(req.session_id),
            user.0.as_str(),
        )
        .with_details(serde_json::json!({ "replacements": session.map().len() })),
    );

    let assessment = state
        .risk
        .assess(&scrubbed, req.emotions, req.audio.as_ref())
        .await;

    // Pattern-scan descriptions may echo placeholders; restore them before
    // the assessment leaves the pipeline.
    let map = session.into_map();
    let mut value = serde_json::to_value(&assessment)?;
    reidentify_value(&mut value, &map);
    let assessment: RiskAssessment = serde_json::from_value(value)?;

    Ok(Json(assessment))
}
