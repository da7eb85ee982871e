//! Error types for the fatal tier and configuration loading.
//!
//! Matchers never fail; anything they cannot recognize shows up as absence in
//! the model instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The command-implementation directory does not exist.
    #[error("source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid category table {}: {source}", path.display())]
    Categories {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("category table contains a category without a name")]
    EmptyCategory,

    #[error("failed to serialize {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown format: {0}. Use markdown or json")]
    UnknownFormat(String),

    #[error("invalid file pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
