//! Error types for ev-amalgamate

use std::path::PathBuf;
use thiserror::Error;

/// ev-amalgamate error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Header expansion exceeded {limit} resolution steps while resolving \"{name}.h\"")]
    ExpansionLimit { limit: usize, name: String },
}

impl Error {
    /// Wrap an I/O failure that happened while reading `path`
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O failure that happened while writing `path`
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for ev-amalgamate
pub type Result<T> = std::result::Result<T, Error>;
