//! Wire types for the resume service endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::errors::AppError;

/// One entry of the `results` array returned by `POST /ocr/resumes`.
///
/// Entries are order-preserving: the position of an entry in the array is the
/// card index it renders under. An entry carries either parsed `data` (plus an
/// optional pre-formatted text rendering) or an `error` explaining why this
/// file could not be processed. `raw_response` accompanies LLM-parse failures
/// and is only ever logged, never rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl UploadResult {
    /// The text sent to the scoring endpoint for this entry: the formatted
    /// rendering when the service produced a non-empty one, otherwise the
    /// compact JSON serialization of `data`.
    pub fn resume_text(&self) -> String {
        match self.formatted_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self
                .data
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "null".to_string()),
        }
    }
}

/// Success body of `POST /ocr/resumes`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<UploadResult>,
}

/// Non-2xx body of `POST /ocr/resumes`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

/// Request body of `POST /score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub jd_text: String,
    pub resume_text: String,
}

/// Response body of `POST /score`. Any subset of fields may be absent; an
/// absent field is simply not rendered. Scores are percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: Option<f64>,
    pub reason: Option<String>,
    pub keyword_score: Option<f64>,
}

/// Body of the service's `GET /` health check.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

/// A resume file staged for upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AppError::FileRead {
                path: path.display().to_string(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());
        Ok(Self {
            content_type: content_type_for(&filename),
            filename,
            bytes,
        })
    }
}

/// Infers the upload content type from the file extension. The service only
/// accepts PDF, PNG, and JPEG; anything else is sent as an opaque blob and
/// rejected per-file by the server.
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
