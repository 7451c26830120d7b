use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sonara_audit::AccessEvent;
use sonara_core::validate::{MAX_TRANSCRIPT_CHARS, validate_text};

use crate::error::ApiError;
use crate::middleware::auth::UserSub;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DeidentifyRequest {
    pub text: String,
}

/// The map itself never leaves the process; callers get the scrubbed text
/// and a count of what was replaced.
#[derive(Serialize)]
pub struct DeidentifyResponse {
    pub scrubbed_text: String,
    pub replacement_count: usize,
}

/// Scrub identifying information from a text payload.
pub async fn deidentify(
    State(state): State<AppState>,
    Extension(user): Extension<UserSub>,
    Json(req): Json<DeidentifyRequest>,
) -> Result<Json<DeidentifyResponse>, ApiError> {
    validate_text("text", &req.text, MAX_TRANSCRIPT_CHARS)?;

    let (scrubbed_text, map) = sonara_shield::deidentify(&req.text);

    state.audit.log_access(
        &AccessEvent::new(
            "deidentify",
            "session_text",
            Uuid::new_v4().to_string(),
            user.0.as_str(),
        )
            .with_details(serde_json::json!({ "replacements": map.len() })),
    );

    Ok(Json(DeidentifyResponse {
        scrubbed_text,
        replacement_count: map.len(),
    }))
}
