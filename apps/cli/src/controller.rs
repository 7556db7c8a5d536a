//! Upload-and-score controller.
//!
//! Owns the session state (the last-received results array and the per-card
//! view state) and drives the two-phase flow: upload a batch of resume files,
//! render one card per result, then score each parsed resume against a job
//! description, sequentially, annotating the cards in place.
//!
//! Dependencies are constructor-injected: the controller sees only the
//! `ResumeApi` and `Renderer` traits.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::api::{ApiError, ResumeApi};
use crate::models::{ResumeFile, ScoreRequest, UploadResult};
use crate::render::Renderer;

/// Per-file limit enforced by the service. Oversized files are still sent
/// (the server rejects them per-file, which renders as an error card), but
/// the client flags them up front.
const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// View state of one rendered card. Index-aligned with `last_results`.
struct CardState {
    /// An error-bearing or data-less result renders title-only: no
    /// formatted-text control, no score region.
    scorable: bool,
    /// The formatted-text reveal is one-shot.
    formatted_revealed: bool,
}

pub struct UploadScoreController {
    api: Arc<dyn ResumeApi>,
    renderer: Box<dyn Renderer>,
    /// Replaced wholesale on each successful upload. Card index == position
    /// in this array.
    last_results: Vec<UploadResult>,
    cards: Vec<CardState>,
}

impl UploadScoreController {
    pub fn new(api: Arc<dyn ResumeApi>, renderer: Box<dyn Renderer>) -> Self {
        Self {
            api,
            renderer,
            last_results: Vec::new(),
            cards: Vec::new(),
        }
    }

    pub fn last_results(&self) -> &[UploadResult] {
        &self.last_results
    }

    /// Upload phase: sends the whole batch in one multipart request and
    /// renders one card per result, in array order.
    ///
    /// Upload failures are surfaced through the renderer's status line and
    /// leave the card set empty; the caller may simply retry.
    pub async fn upload(&mut self, files: Vec<ResumeFile>) {
        self.renderer.clear();
        self.cards.clear();
        self.renderer.set_status("Uploading...");

        if files.is_empty() {
            self.renderer.set_status("Please select one or more files.");
            return;
        }

        for file in &files {
            if file.bytes.len() > MAX_FILE_BYTES {
                warn!(
                    "{} is {} bytes; the service rejects files over {} bytes",
                    file.filename,
                    file.bytes.len(),
                    MAX_FILE_BYTES
                );
            }
        }

        match self.api.upload_resumes(files).await {
            Ok(response) => {
                if !response.success {
                    debug!("upload response carried success=false");
                }
                self.renderer.set_status("Completed");
                self.last_results = response.results;
                for (index, result) in self.last_results.iter().enumerate() {
                    if let (Some(error), Some(raw)) = (&result.error, &result.raw_response) {
                        debug!("result {index} failed ({error}); raw response: {raw}");
                    }
                    self.renderer.render_card(index, result);
                    self.cards.push(CardState {
                        scorable: result.error.is_none() && result.data.is_some(),
                        formatted_revealed: false,
                    });
                }
            }
            Err(ApiError::Api { status, message }) => {
                debug!("upload rejected with status {status}");
                self.renderer.set_status(&format!("Error: {message}"));
            }
            Err(err) => {
                error!("upload failed: {err}");
                self.renderer.set_status(&format!("Upload failed: {err}"));
            }
        }
    }

    /// Reveals a card's formatted text (empty when the service sent none).
    /// One-shot per card: repeated calls, calls on error cards, and calls
    /// with out-of-range indices do nothing.
    pub fn show_formatted(&mut self, index: usize) {
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        if !card.scorable || card.formatted_revealed {
            return;
        }
        card.formatted_revealed = true;

        let formatted = self.last_results[index]
            .formatted_text
            .as_deref()
            .unwrap_or("");
        self.renderer.reveal_formatted(index, formatted);
    }

    /// Scoring phase: one request per error-free result, strictly sequential.
    /// Each response is awaited before the next request goes out, so at most
    /// one scoring request is in flight and annotations land in array order.
    ///
    /// Per-entry failures are logged and skipped; the loop always runs to the
    /// end and the final status is set regardless.
    pub async fn score_all(&mut self, jd_text: &str) {
        let jd_text = jd_text.trim();
        if jd_text.is_empty() {
            self.renderer.alert("Please enter a job description");
            return;
        }

        self.renderer.set_status("Scoring...");

        for index in 0..self.last_results.len() {
            let result = &self.last_results[index];
            if result.error.is_some() {
                continue;
            }

            let request = ScoreRequest {
                jd_text: jd_text.to_string(),
                resume_text: result.resume_text(),
            };

            match self.api.score(&request).await {
                Ok(outcome) => {
                    let has_card = self.cards.get(index).map(|c| c.scorable).unwrap_or(false);
                    if has_card && outcome.score.is_some() {
                        self.renderer.annotate_score(index, &outcome);
                    }
                }
                Err(err) => {
                    error!("score request for card {index} failed: {err}");
                }
            }
        }

        self.renderer.set_status("Scoring completed");
    }
}
