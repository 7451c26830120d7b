//! sonara-risk
//!
//! The risk fusion engine: keyword, emotion-threshold, audio-threshold and
//! model-pattern evidence folded into one calibrated risk level with
//! downgrade-only false-positive suppression. Keyword signals are computed
//! locally and survive any provider outage — an AI failure can never hide
//! locally derived risk evidence.

pub mod detectors;
pub mod engine;
pub mod score;

pub use detectors::RiskThresholds;
pub use engine::RiskEngine;
