use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Historical context for a client, supplied by the platform's record store
/// when available. Used by the complexity score and the hybrid strategy's
/// summarization pass; never cached across requests because case state can
/// change session to session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientHistory {
    pub session_count: u32,
    /// Concatenated prior record text (already de-identified by the caller's
    /// shield session before it reaches any provider).
    pub record_text: String,
    pub risk_factors: Vec<String>,
}
