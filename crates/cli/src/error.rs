//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file is not valid JSON for the expected type.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A grant rejected the action or failed validation.
    #[error(transparent)]
    Authorization(#[from] authz::Error),

    /// The keeper could not find or persist a grant.
    #[error(transparent)]
    Keeper(#[from] keeper::Error),

    /// Output could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
