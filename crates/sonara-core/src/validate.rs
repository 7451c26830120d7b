//! Input validation applied before any text is handed to the pipeline.
//!
//! Validation failures are the only errors surfaced to callers as rejections;
//! everything downstream degrades to defined fallbacks instead. Text that
//! fails validation is never sent to an AI provider.

use crate::error::CoreError;

/// Upper bound on transcript size accepted by the pipeline.
pub const MAX_TRANSCRIPT_CHARS: usize = 100_000;

/// Upper bound on prior-record size accepted alongside a transcript.
pub const MAX_RECORD_CHARS: usize = 500_000;

/// Reject empty or oversized text with a descriptive reason.
pub fn validate_text(field: &'static str, text: &str, max: usize) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::EmptyText { field });
    }
    let len = text.chars().count();
    if len > max {
        return Err(CoreError::OversizedText { field, len, max });
    }
    Ok(())
}

/// Validate a session transcript against the default size bound.
pub fn validate_transcript(text: &str) -> Result<(), CoreError> {
    validate_text("transcript", text, MAX_TRANSCRIPT_CHARS)
}
