//! sonara-notes
//!
//! The complexity router and note orchestrator: scores how much context a
//! case needs, selects a processing strategy (single provider, hybrid
//! summarize-then-analyze, or consultation with a section-wise merge), and
//! always returns a well-formed note — degrading through fallbacks instead
//! of raising to the caller.

pub mod complexity;
pub mod context;
pub mod engine;

pub use complexity::{ComplexityWeights, score_complexity};
pub use engine::{NoteConfig, NoteEngine, NoteOutcome, select_strategy};
