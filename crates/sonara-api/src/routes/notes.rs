use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sonara_audit::AccessEvent;
use sonara_core::models::history::ClientHistory;
use sonara_core::models::note::{NoteTransaction, ProcessingMode, StructuredNote};
use sonara_core::validate::{MAX_RECORD_CHARS, validate_text, validate_transcript};
use sonara_shield::{DeidSession, reidentify_value};

use crate::error::ApiError;
use crate::middleware::auth::UserSub;
use crate::routes::emotion::resource_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NotesRequest {
    pub transcript: String,
    pub mode: ProcessingMode,
    pub history: Option<ClientHistory>,
    pub session_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct NotesResponse {
    pub note: StructuredNote,
    pub transaction: NoteTransaction,
    pub complexity: f64,
}

/// Generate a structured note for a session transcript.
///
/// The transcript and any prior-record text are scrubbed through one shield
/// session before any provider call; the generated note is re-identified
/// before it is returned.
pub async fn generate_note(
    State(state): State<AppState>,
    Extension(user): Extension<UserSub>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<NotesResponse>, ApiError> {
    validate_transcript(&req.transcript)?;
    if let Some(history) = &req.history {
        if !history.record_text.is_empty() {
            validate_text("history record", &history.record_text, MAX_RECORD_CHARS)?;
        }
    }

    let mut session = DeidSession::new();
    let scrubbed_transcript = session.scrub(&req.transcript);
    let scrubbed_history = req.history.map(|history| ClientHistory {
        record_text: session.scrub(&history.record_text),
        ..history
    });

    state.audit.log_access(
        &AccessEvent::new(
            "note_generation",
            "session_transcript",
            resource_id(req.session_id),
            user.0.as_str(),
        )
        .with_details(serde_json::json!({
            "mode": req.mode,
            "replacements": session.map().len(),
        })),
    );

    let outcome = state
        .notes
        .process_note(&scrubbed_transcript, req.mode, scrubbed_history.as_ref())
        .await;

    let map = session.into_map();
    let mut note_value = serde_json::to_value(&outcome.note)?;
    reidentify_value(&mut note_value, &map);
    let note: StructuredNote = serde_json::from_value(note_value)?;

    Ok(Json(NotesResponse {
        note,
        transaction: outcome.transaction,
        complexity: outcome.complexity,
    }))
}
