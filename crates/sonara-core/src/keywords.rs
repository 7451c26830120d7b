//! Severity-tiered clinical risk vocabulary.
//!
//! Matched case-insensitively against de-identified transcripts by the risk
//! engine's keyword scan and by the transcript-only complexity estimate.
//! The tiers are tunable constants with no claimed empirical basis; keep
//! changes reviewed by a clinician.

/// Phrases that alone justify a critical-severity signal.
pub const CRITICAL_KEYWORDS: &[&str] = &[
    "kill myself",
    "end my life",
    "suicide plan",
    "want to die",
    "better off dead",
];

pub const HIGH_KEYWORDS: &[&str] = &[
    "hurt myself",
    "self-harm",
    "no reason to live",
    "hopeless",
    "can't go on",
];

pub const MEDIUM_KEYWORDS: &[&str] = &[
    "worthless",
    "overwhelmed",
    "can't cope",
    "giving up",
    "no way out",
];

/// Count how many risk keywords (any tier) occur in the text.
///
/// Matching is lowercase substring containment; each distinct keyword counts
/// once regardless of repetition.
pub fn count_keywords(text: &str) -> usize {
    let lower = text.to_lowercase();
    CRITICAL_KEYWORDS
        .iter()
        .chain(HIGH_KEYWORDS)
        .chain(MEDIUM_KEYWORDS)
        .filter(|kw| lower.contains(*kw))
        .count()
}
