use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the catalog and recorder collaborators. None of these are fatal
/// for an in-progress session; callers surface them as notices.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz not found: {0}")]
    NotFound(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid quiz file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid quiz {id}: {reason}")]
    Invalid { id: String, reason: String },
    #[error("save failed: {0}")]
    SaveFailed(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
