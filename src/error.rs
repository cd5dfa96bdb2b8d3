//! Error types for the appraiser.
//!
//! Failing to price an entity is not an error; these variants cover bad input
//! data and file handling only.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying a universe.
#[derive(Error, Debug)]
pub enum AppraiseError {
    /// An id was referenced that the registry does not contain.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The same id was registered twice.
    #[error("duplicate entity in registry: {0}")]
    DuplicateEntity(String),

    /// A recipe failed load-time validation.
    #[error("invalid recipe for {output}: {reason}")]
    InvalidRecipe {
        /// Output entity of the offending recipe.
        output: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppraiseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for appraiser operations.
pub type AppraiseResult<T> = Result<T, AppraiseError>;
