use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type.
///
/// Only failures that should abort the command end up here (unreadable input
/// files, an unreachable service on `health`, a failed `--save`). Everything
/// the original surface kept non-fatal — upload failures, per-item scoring
/// failures — is handled inside the controller and never becomes an
/// `AppError`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
