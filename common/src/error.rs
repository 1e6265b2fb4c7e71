use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("capability '{0}' is registered twice")]
    DuplicateCapability(String),

    #[error("capability '{name}' faulted: {reason}")]
    CapabilityFault { name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
