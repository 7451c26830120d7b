use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which detector produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SignalKind {
    Keyword,
    Emotion,
    Audio,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Aggregation weight used by the risk score formula.
    pub fn weight(self) -> f64 {
        match self {
            Severity::Low => 10.0,
            Severity::Medium => 40.0,
            Severity::High => 70.0,
            Severity::Critical => 100.0,
        }
    }
}

/// One piece of evidence contributing to a risk assessment.
///
/// Signals are accumulated, never mutated, within a single assessment call;
/// the collected list is the sole input to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskSignal {
    pub kind: SignalKind,
    pub severity: Severity,
    pub description: String,
    /// `[0, 1]`.
    pub confidence: f64,
    /// Free-form provenance, e.g. `"keyword-scan"` or a model id.
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// The fused result of one assessment call. Immutable after creation; the
/// caller persists and acts on it (escalation is an external collaborator).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// `[0, 100]`.
    pub risk_score: f64,
    pub signals: Vec<RiskSignal>,
    /// Arithmetic mean of contributing signal confidences; `1.0` when there
    /// are none.
    pub confidence: f64,
    /// True only when the level remains critical after the false-positive
    /// downgrade pass.
    pub requires_immediate_attention: bool,
    pub recommendations: Vec<String>,
    pub created_at: jiff::Timestamp,
}
