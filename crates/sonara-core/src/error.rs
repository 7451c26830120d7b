use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("empty {field}")]
    EmptyText { field: &'static str },

    #[error("{field} exceeds {max} characters (got {len})")]
    OversizedText {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
