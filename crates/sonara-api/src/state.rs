use std::sync::Arc;

use sonara_audit::AuditSink;
use sonara_emotion::EmotionEngine;
use sonara_notes::NoteEngine;
use sonara_risk::RiskEngine;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub emotion: Arc<EmotionEngine>,
    pub notes: Arc<NoteEngine>,
    pub risk: Arc<RiskEngine>,
    pub audit: Arc<dyn AuditSink>,
}
