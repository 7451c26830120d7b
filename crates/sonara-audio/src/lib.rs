//! sonara-audio
//!
//! Paralinguistic feature extraction: transcript-based estimation when no
//! raw audio is available, and a cancellable streaming session over a
//! platform-provided frequency source. Also the rule-based mapping from
//! features to coarse emotion indicators.

pub mod error;
pub mod features;
pub mod indicators;
pub mod stream;

pub use error::AudioError;
pub use features::features_from_transcript;
pub use indicators::{AudioEmotionIndicators, IndicatorThresholds, extract_emotion_indicators};
pub use stream::{CaptureSession, FrequencySource};
