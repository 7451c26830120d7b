//! Case complexity estimation.
//!
//! A `[0, 1]` heuristic of how much context a case requires. Computed fresh
//! per request — never cached, because case state can change session to
//! session. The normalization caps and weights are tunable constants with
//! no claimed empirical basis.

use sonara_core::keywords::count_keywords;
use sonara_core::models::history::ClientHistory;

#[derive(Debug, Clone, Copy)]
pub struct ComplexityWeights {
    /// Session count at which the history term saturates.
    pub session_norm: f64,
    /// Record size (chars) at which the history term saturates.
    pub record_norm: f64,
    /// Risk-factor count at which the history term saturates.
    pub risk_factor_norm: f64,
    /// Transcript length (chars) at which the estimate term saturates.
    pub transcript_norm: f64,
    /// Word count at which the estimate term saturates.
    pub word_norm: f64,
    /// Risk-keyword count at which the estimate term saturates.
    pub keyword_norm: f64,
    /// Weights for the three terms of either path.
    pub primary_weight: f64,
    pub secondary_weight: f64,
    pub tertiary_weight: f64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            session_norm: 50.0,
            record_norm: 200_000.0,
            risk_factor_norm: 5.0,
            transcript_norm: 5_000.0,
            word_norm: 1_000.0,
            keyword_norm: 3.0,
            primary_weight: 0.4,
            secondary_weight: 0.4,
            tertiary_weight: 0.2,
        }
    }
}

/// Score case complexity from historical data when available, otherwise
/// estimate it from the transcript alone. Each term is capped at 1 before
/// weighting.
pub fn score_complexity(
    transcript: &str,
    history: Option<&ClientHistory>,
    weights: &ComplexityWeights,
) -> f64 {
    let w = weights;
    let score = match history {
        Some(h) => {
            let sessions = (h.session_count as f64 / w.session_norm).min(1.0);
            let record = (h.record_text.len() as f64 / w.record_norm).min(1.0);
            let risk = (h.risk_factors.len() as f64 / w.risk_factor_norm).min(1.0);
            sessions * w.primary_weight + record * w.secondary_weight + risk * w.tertiary_weight
        }
        None => {
            let length = (transcript.len() as f64 / w.transcript_norm).min(1.0);
            let words =
                (transcript.split_whitespace().count() as f64 / w.word_norm).min(1.0);
            let keywords = (count_keywords(transcript) as f64 / w.keyword_norm).min(1.0);
            length * w.primary_weight + words * w.secondary_weight + keywords * w.tertiary_weight
        }
    };
    score.clamp(0.0, 1.0)
}
