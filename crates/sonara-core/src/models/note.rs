use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::usage::TokenUsage;

/// A structured session note produced by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StructuredNote {
    pub summary: String,
    pub presenting_issues: String,
    pub interventions: String,
    pub client_response: String,
    pub plan: String,
}

impl StructuredNote {
    /// The note's sections in a fixed order, for section-wise operations
    /// such as the consultation merge.
    pub fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("summary", &self.summary),
            ("presenting_issues", &self.presenting_issues),
            ("interventions", &self.interventions),
            ("client_response", &self.client_response),
            ("plan", &self.plan),
        ]
    }
}

/// Processing tier requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProcessingMode {
    Standard,
    Premium,
    Consultation,
}

/// The strategy the router selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GenerationStrategy {
    /// One provider, one pass.
    Single,
    /// Summarize-then-analyze across two providers.
    Hybrid,
    /// Both strategies in parallel, merged section by section.
    Consultation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TransactionStatus {
    /// The selected strategy succeeded.
    Complete,
    /// The selected strategy failed and a degraded path produced the note.
    Fallback,
    /// No strategy produced a note; the marked placeholder was returned.
    Failed,
}

/// Accounting record for one note-generation request, before it is handed
/// to the external store.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NoteTransaction {
    pub id: Uuid,
    pub strategy: GenerationStrategy,
    /// Provider/model identifiers that served the request.
    pub model_ids: Vec<String>,
    pub status: TransactionStatus,
    pub usage: TokenUsage,
    pub created_at: jiff::Timestamp,
}
