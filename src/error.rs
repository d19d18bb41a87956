//! Library error type.
//!
//! Style violations are never errors; they are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s. These variants cover input
//! that cannot be processed at all.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unterminated comment starting on line {line}")]
    UnterminatedComment { line: usize },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown sniff: {0}. Use file-comment, class-comment or function-comment")]
    UnknownSniff(String),
}

pub type Result<T> = std::result::Result<T, Error>;
