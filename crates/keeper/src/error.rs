use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("authorization error: {0}")]
    Authorization(#[from] authz::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate grant: {0}")]
    DuplicateGrant(String),

    #[error("grant not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
