//! sonara-emotion
//!
//! Emotion inference from transcripts, audio features, or both. Transcript
//! detection delegates to a completion provider with a strict
//! parse-and-clamp step; any failure degrades to the neutral vector so a
//! broken model call can never manufacture a risk signal.

pub mod engine;
pub mod parse;

pub use engine::EmotionEngine;
pub use parse::parse_emotion_response;
