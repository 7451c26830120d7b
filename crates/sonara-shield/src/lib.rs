//! sonara-shield
//!
//! Reversible de-identification of free text ahead of any external model
//! call, and re-identification of model output afterwards. The placeholder
//! map lives in memory for exactly one pipeline invocation and is never
//! persisted.

pub mod reid;
pub mod scrub;

pub use reid::{reidentify, reidentify_value};
pub use scrub::{DeidSession, deidentify};
