/// Categories of identifying information the shield scrubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhiCategory {
    Name,
    Date,
    Phone,
    Email,
    Address,
}

impl PhiCategory {
    /// The label embedded in placeholders, e.g. `NAME` in `[NAME_1]`.
    pub fn label(self) -> &'static str {
        match self {
            PhiCategory::Name => "NAME",
            PhiCategory::Date => "DATE",
            PhiCategory::Phone => "PHONE",
            PhiCategory::Email => "EMAIL",
            PhiCategory::Address => "ADDRESS",
        }
    }
}

/// One placeholder substitution made during de-identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhiReplacement {
    pub placeholder: String,
    pub original: String,
    pub category: PhiCategory,
}

/// The placeholder → original mapping for one pipeline invocation.
///
/// Deliberately not serializable: the map is created fresh per request, held
/// in memory for the duration of one invocation, and discarded after
/// re-identification. It must never be persisted or cross a request
/// boundary.
#[derive(Debug, Default)]
pub struct DeidentificationMap {
    replacements: Vec<PhiReplacement>,
}

impl DeidentificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an original value under a fresh placeholder for its category
    /// and return the placeholder. Counters increment per category within
    /// the map, starting at 1.
    pub fn insert(&mut self, category: PhiCategory, original: &str) -> String {
        let n = self
            .replacements
            .iter()
            .filter(|r| r.category == category)
            .count()
            + 1;
        let placeholder = format!("[{}_{}]", category.label(), n);
        self.replacements.push(PhiReplacement {
            placeholder: placeholder.clone(),
            original: original.to_string(),
            category,
        });
        placeholder
    }

    /// Look up the placeholder already assigned to an original value within
    /// a category. Repeated occurrences of the same value must scrub to the
    /// same placeholder.
    pub fn placeholder_for_original(&self, category: PhiCategory, original: &str) -> Option<&str> {
        self.replacements
            .iter()
            .find(|r| r.category == category && r.original == original)
            .map(|r| r.placeholder.as_str())
    }

    /// Look up the original value for a placeholder, if it was produced by
    /// this map.
    pub fn original_for(&self, placeholder: &str) -> Option<&str> {
        self.replacements
            .iter()
            .find(|r| r.placeholder == placeholder)
            .map(|r| r.original.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhiReplacement> {
        self.replacements.iter()
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}
