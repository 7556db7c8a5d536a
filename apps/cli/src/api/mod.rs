/// Resume service client — the single point of entry for all HTTP calls to
/// the parsing/scoring backend.
///
/// ARCHITECTURAL RULE: no other module may talk to the service directly.
/// The controller sees only the `ResumeApi` trait, so tests can swap in a
/// scripted implementation without a network.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    ErrorBody, HealthResponse, ResumeFile, ScoreRequest, ScoreResponse, UploadResponse,
};

const UPLOAD_PATH: &str = "/ocr/resumes";
const SCORE_PATH: &str = "/score";
const HEALTH_PATH: &str = "/";

/// Field name the service expects every file under (repeated per file).
pub const UPLOAD_FIELD: &str = "files";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The client seam between the controller and the resume service.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// Uploads a batch of files to the OCR endpoint in a single multipart
    /// request and returns the per-file results.
    async fn upload_resumes(&self, files: Vec<ResumeFile>) -> Result<UploadResponse, ApiError>;

    /// Scores one resume against a job description.
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, ApiError>;

    /// Pings the service's health endpoint.
    async fn health(&self) -> Result<HealthResponse, ApiError>;
}

/// Reqwest-backed `ResumeApi` implementation.
#[derive(Clone)]
pub struct HttpResumeApi {
    client: Client,
    base_url: String,
}

impl HttpResumeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ResumeApi for HttpResumeApi {
    async fn upload_resumes(&self, files: Vec<ResumeFile>) -> Result<UploadResponse, ApiError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(file.content_type)?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // The service reports upload failures as {"detail": "..."}; fall
            // back to the status reason when the body carries no detail.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;
        debug!("upload returned {} result(s)", parsed.results.len());
        Ok(parsed)
    }

    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, ApiError> {
        let response = self
            .client
            .post(self.url(SCORE_PATH))
            .json(request)
            .send()
            .await?;

        // The scoring endpoint reports failures in-band: a body without a
        // `score` field simply produces no annotation. No status gate here.
        let body = response.text().await?;
        let parsed: ScoreResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Requests captured by the mock service.
    #[derive(Clone, Default)]
    struct Received {
        files: Arc<Mutex<Vec<(String, String, usize)>>>,
        score_requests: Arc<Mutex<Vec<ScoreRequest>>>,
    }

    async fn mock_ocr(State(received): State<Received>, mut multipart: Multipart) -> Json<Value> {
        let mut results = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let field_name = field.name().unwrap_or_default().to_string();
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap();
            received
                .files
                .lock()
                .unwrap()
                .push((field_name, filename.clone(), bytes.len()));
            results.push(json!({
                "filename": filename,
                "data": {"bytes": bytes.len()},
                "formatted_text": format!("FILE: {filename}")
            }));
        }
        Json(json!({"success": true, "results": results}))
    }

    async fn mock_score(
        State(received): State<Received>,
        Json(request): Json<ScoreRequest>,
    ) -> Json<Value> {
        received.score_requests.lock().unwrap().push(request);
        Json(json!({"success": true, "score": 87.0, "reason": "strong match", "keyword_score": 60.0}))
    }

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn api_for(base_url: &str) -> HttpResumeApi {
        HttpResumeApi::new(base_url, Duration::from_secs(5))
    }

    fn pdf(filename: &str, bytes: &[u8]) -> ResumeFile {
        ResumeFile {
            filename: filename.to_string(),
            content_type: "application/pdf",
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_upload_sends_every_file_under_shared_field() {
        let received = Received::default();
        let app = Router::new()
            .route("/ocr/resumes", post(mock_ocr))
            .with_state(received.clone());
        let base_url = spawn(app).await;

        let response = api_for(&base_url)
            .upload_resumes(vec![pdf("a.pdf", b"one"), pdf("b.pdf", b"three")])
            .await
            .unwrap();

        let files = received.files.lock().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], ("files".to_string(), "a.pdf".to_string(), 3));
        assert_eq!(files[1], ("files".to_string(), "b.pdf".to_string(), 5));

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].filename.as_deref(), Some("a.pdf"));
        assert_eq!(
            response.results[1].formatted_text.as_deref(),
            Some("FILE: b.pdf")
        );
    }

    #[tokio::test]
    async fn test_upload_non_2xx_surfaces_detail() {
        let app = Router::new().route(
            "/ocr/resumes",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Unsupported file format"})),
                )
            }),
        );
        let base_url = spawn(app).await;

        let err = api_for(&base_url)
            .upload_resumes(vec![pdf("a.pdf", b"x")])
            .await
            .unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Unsupported file format");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_non_2xx_without_detail_uses_status_reason() {
        let app = Router::new().route(
            "/ocr/resumes",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base_url = spawn(app).await;

        let err = api_for(&base_url)
            .upload_resumes(vec![pdf("a.pdf", b"x")])
            .await
            .unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_malformed_body_is_parse_error() {
        let app = Router::new().route("/ocr/resumes", post(|| async { "not json" }));
        let base_url = spawn(app).await;

        let err = api_for(&base_url)
            .upload_resumes(vec![pdf("a.pdf", b"x")])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_score_round_trip() {
        let received = Received::default();
        let app = Router::new()
            .route("/score", post(mock_score))
            .with_state(received.clone());
        let base_url = spawn(app).await;

        let request = ScoreRequest {
            jd_text: "Rust engineer".to_string(),
            resume_text: "NAME: A".to_string(),
        };
        let outcome = api_for(&base_url).score(&request).await.unwrap();

        assert_eq!(outcome.score, Some(87.0));
        assert_eq!(outcome.reason.as_deref(), Some("strong match"));
        assert_eq!(outcome.keyword_score, Some(60.0));

        let requests = received.score_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].jd_text, "Rust engineer");
        assert_eq!(requests[0].resume_text, "NAME: A");
    }

    #[tokio::test]
    async fn test_score_in_band_failure_yields_empty_outcome() {
        // The service answers scoring failures with a JSON body that simply
        // lacks the score fields; the client must not treat that as an error.
        let app = Router::new().route(
            "/score",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "model unavailable"})),
                )
            }),
        );
        let base_url = spawn(app).await;

        let outcome = api_for(&base_url)
            .score(&ScoreRequest {
                jd_text: "jd".to_string(),
                resume_text: "resume".to_string(),
            })
            .await
            .unwrap();

        assert!(outcome.score.is_none());
        assert!(outcome.reason.is_none());
        assert!(outcome.keyword_score.is_none());
    }

    #[tokio::test]
    async fn test_health_decodes_service_status() {
        let app = Router::new().route(
            "/",
            get(|| async { Json(json!({"success": true, "message": "Resume Parser API is running"})) }),
        );
        let base_url = spawn(app).await;

        let health = api_for(&base_url).health().await.unwrap();
        assert!(health.success);
        assert_eq!(health.message, "Resume Parser API is running");
    }

    #[tokio::test]
    async fn test_health_non_2xx_is_api_error() {
        let app = Router::new().route("/", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base_url = spawn(app).await;

        let err = api_for(&base_url).health().await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 503, .. }));
    }
}
