//! Aggregation, level mapping and false-positive suppression.

use sonara_core::models::risk::{RiskLevel, RiskSignal, Severity, SignalKind};

/// Score-to-level cut points.
pub const CRITICAL_SCORE_CUTOFF: f64 = 80.0;
pub const HIGH_SCORE_CUTOFF: f64 = 60.0;
pub const MEDIUM_SCORE_CUTOFF: f64 = 30.0;

/// Caps applied when the suppression pass downgrades a level.
pub const DOWNGRADED_HIGH_CAP: f64 = 79.0;
pub const DOWNGRADED_MEDIUM_CAP: f64 = 59.0;

/// Weighted aggregate over the present signals:
/// `Σ(weight × confidence) / Σ(weight) × 100`. No signals scores zero.
pub fn aggregate_score(signals: &[RiskSignal]) -> f64 {
    if signals.is_empty() {
        return 0.0;
    }
    let weighted: f64 = signals
        .iter()
        .map(|s| s.severity.weight() * s.confidence)
        .sum();
    let total_weight: f64 = signals.iter().map(|s| s.severity.weight()).sum();
    weighted / total_weight * 100.0
}

pub fn level_for_score(score: f64) -> RiskLevel {
    if score >= CRITICAL_SCORE_CUTOFF {
        RiskLevel::Critical
    } else if score >= HIGH_SCORE_CUTOFF {
        RiskLevel::High
    } else if score >= MEDIUM_SCORE_CUTOFF {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// The false-positive suppression pass. Downgrade-only: it never raises a
/// level, and the rules cascade in order — a critical downgraded to high is
/// then subject to the high rule.
///
/// - Critical survives only with a critical-severity keyword match or at
///   least two signals of any kind; otherwise it drops to high, capped at 79.
/// - High survives only with at least two signals; otherwise it drops to
///   medium, capped at 59.
pub fn suppress(level: RiskLevel, score: f64, signals: &[RiskSignal]) -> (RiskLevel, f64) {
    let mut level = level;
    let mut score = score;

    if level == RiskLevel::Critical {
        let has_critical_keyword = signals
            .iter()
            .any(|s| s.kind == SignalKind::Keyword && s.severity == Severity::Critical);
        if !has_critical_keyword && signals.len() < 2 {
            level = RiskLevel::High;
            score = score.min(DOWNGRADED_HIGH_CAP);
        }
    }

    if level == RiskLevel::High && signals.len() < 2 {
        level = RiskLevel::Medium;
        score = score.min(DOWNGRADED_MEDIUM_CAP);
    }

    (level, score)
}

/// Arithmetic mean of the contributing confidences; `1.0` with no signals.
pub fn mean_confidence(signals: &[RiskSignal]) -> f64 {
    if signals.is_empty() {
        return 1.0;
    }
    signals.iter().map(|s| s.confidence).sum::<f64>() / signals.len() as f64
}

/// Escalation guidance per final level. A fixed table, never model
/// generated, so the guidance stays auditable and independent of model
/// variability.
pub fn recommendations_for(level: RiskLevel) -> Vec<String> {
    let lines: &[&str] = match level {
        RiskLevel::Critical => &[
            "Contact the client and their crisis contacts immediately",
            "Arrange a same-day safety assessment; do not wait for the next session",
            "Escalate to the supervising clinician and document the escalation",
        ],
        RiskLevel::High => &[
            "Schedule a follow-up contact within 24 hours",
            "Review and update the safety plan with the client",
            "Notify the treating clinician of the elevated assessment",
        ],
        RiskLevel::Medium => &[
            "Raise the flagged observations in the next session",
            "Consider increasing session frequency",
            "Monitor mood trajectory across upcoming appointments",
        ],
        RiskLevel::Low => &["Continue routine monitoring"],
    };
    lines.iter().map(|s| s.to_string()).collect()
}
