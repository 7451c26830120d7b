//! Ordered pattern matchers that replace identifying substrings with
//! `[CATEGORY_n]` placeholders.
//!
//! Matchers run in a fixed order (names, dates, phones, emails, addresses)
//! so overlapping matches resolve deterministically; a substring consumed by
//! an earlier matcher is already a placeholder by the time later matchers
//! run. This ordering is part of the contract — reorderings change which
//! category wins an overlap and must not be made casually.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use sonara_core::models::deid::{DeidentificationMap, PhiCategory};

/// Two capitalized tokens, the shape of a western full name.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").unwrap());

/// `DD.MM.YYYY` or `DD/MM/YYYY`.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}\.\d{2}\.\d{4}\b|\b\d{2}/\d{2}/\d{4}\b").unwrap());

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\+\d{1,3}[ .-]?\d{2,4}[ .-]?\d{3,8}(?:[ .-]?\d{2,6})?|\(\d{2,4}\)[ .-]?\d{3,4}[ .-]?\d{3,6}|\b\d{3,4}[ .-]\d{3,4}[ .-]\d{2,6}\b|\b\d{10,11}\b",
    )
    .unwrap()
});

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b\d{1,5} [A-Z][a-z]+(?: [A-Z][a-z]+)? (?:Street|St|Avenue|Ave|Road|Rd|Lane|Ln|Drive|Dr|Boulevard|Blvd|Way|Court|Ct|Place|Pl)\b",
    )
    .unwrap()
});

/// Capitalized sentence openers that the name pattern would otherwise eat.
const NAME_STOPWORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "Our", "Your", "Their", "Dear", "Every", "Each",
    "Some", "Many", "Next", "Last", "New",
];

/// Street suffixes; a "Maple Street"-shaped pair is left for the address
/// matcher, which captures the house number with it.
const STREET_SUFFIXES: &[&str] = &[
    "Street", "St", "Avenue", "Ave", "Road", "Rd", "Lane", "Ln", "Drive", "Dr", "Boulevard",
    "Blvd", "Way", "Court", "Ct", "Place", "Pl",
];

/// A scrubbing session holding the map for one pipeline invocation.
///
/// `scrub` may be called repeatedly (transcript, then prior-record text) and
/// keeps placeholders consistent across calls: the same original value
/// always maps to the same placeholder within a session.
#[derive(Debug, Default)]
pub struct DeidSession {
    map: DeidentificationMap,
}

impl DeidSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace identifying substrings with placeholders, recording each
    /// original in the session map.
    pub fn scrub(&mut self, text: &str) -> String {
        let mut out = apply(&NAME_PATTERN, PhiCategory::Name, text, &mut self.map, name_guard);
        out = apply(&DATE_PATTERN, PhiCategory::Date, &out, &mut self.map, no_guard);
        out = apply(&PHONE_PATTERN, PhiCategory::Phone, &out, &mut self.map, no_guard);
        out = apply(&EMAIL_PATTERN, PhiCategory::Email, &out, &mut self.map, no_guard);
        out = apply(&ADDRESS_PATTERN, PhiCategory::Address, &out, &mut self.map, no_guard);
        out
    }

    pub fn map(&self) -> &DeidentificationMap {
        &self.map
    }

    pub fn into_map(self) -> DeidentificationMap {
        self.map
    }
}

/// One-shot convenience over [`DeidSession`].
pub fn deidentify(text: &str) -> (String, DeidentificationMap) {
    let mut session = DeidSession::new();
    let scrubbed = session.scrub(text);
    (scrubbed, session.into_map())
}

fn apply(
    pattern: &Regex,
    category: PhiCategory,
    text: &str,
    map: &mut DeidentificationMap,
    guard: fn(&str) -> bool,
) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            if guard(matched) {
                return matched.to_string();
            }
            match map.placeholder_for_original(category, matched) {
                Some(existing) => existing.to_string(),
                None => map.insert(category, matched),
            }
        })
        .into_owned()
}

fn no_guard(_matched: &str) -> bool {
    false
}

/// Reject capitalized pairs that are not names: sentence openers and street
/// names.
fn name_guard(matched: &str) -> bool {
    let mut tokens = matched.split(' ');
    let first = tokens.next().unwrap_or("");
    let second = tokens.next().unwrap_or("");
    NAME_STOPWORDS.contains(&first) || STREET_SUFFIXES.contains(&second)
}
