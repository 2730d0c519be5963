//! Centralized error types for emlmsg.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the emlmsg library.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified input file does not exist.
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// The input bytes could not be parsed as a MIME message.
    #[error("Malformed source message: {0}")]
    MalformedSource(String),

    /// No `From` identity exists, yet one was needed to resolve the
    /// representing (on-behalf-of) identity.
    #[error("Message has no From address to resolve the sender from")]
    MissingSender,

    /// The container-to-MIME direction was requested.
    #[error("Conversion from a message container back to MIME is not implemented")]
    UnsupportedDirection,

    /// The message container could not be encoded or decoded.
    #[error("Container error: {0}")]
    Container(String),
}

/// Convenience alias for `Result<T, ConvertError>`.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (rare; prefer `ConvertError::io`).
impl From<std::io::Error> for ConvertError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}

impl From<bincode::Error> for ConvertError {
    fn from(e: bincode::Error) -> Self {
        Self::Container(e.to_string())
    }
}
