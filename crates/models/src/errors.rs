use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Message without the variant prefix, suitable for client-facing envelopes.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation(m) | ModelError::Db(m) => m,
        }
    }
}
