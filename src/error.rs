// Error types for index loading, configuration and emission

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the library layer
///
/// The command layer wraps these in `anyhow::Error` and maps them to
/// exit codes (see `output`).
#[derive(Debug, Error)]
pub enum ReachError {
    /// Invalid or contradictory configuration (bad bound, clashing labels)
    #[error("configuration error: {0}")]
    Config(String),

    /// Input edge file does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Output file already exists and would be overwritten
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// Directory an output file would be created in does not exist
    #[error("output directory not found: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    /// Malformed line in the edge file
    #[error("parse error at line {line}: {reason} (line: {content:?})")]
    Parse {
        /// 1-based line number
        line: usize,
        /// The offending line as read
        content: String,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration file could not be decoded
    #[error("invalid config file {}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Read or write failure on a named path
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReachError {
    pub(crate) fn parse(line: usize, content: &str, reason: impl Into<String>) -> Self {
        ReachError::Parse {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReachError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReachError>;
