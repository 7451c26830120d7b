use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio capture failed: {0}")]
    Capture(String),

    #[error("capture session already stopped")]
    SessionStopped,
}
