//! Terminal renderer — writes cards as indented text blocks.

use std::io::{self, Write};

use crate::models::{ScoreResponse, UploadResult};
use crate::render::Renderer;

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        // stdout may be a closed pipe; rendering never aborts the session.
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) {
        // A terminal scrollback has nothing to clear; cards from a previous
        // upload in the same process are simply superseded below.
    }

    fn set_status(&mut self, status: &str) {
        self.line(status);
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("!! {message}"));
    }

    fn render_card(&mut self, index: usize, result: &UploadResult) {
        let title = result.filename.as_deref().unwrap_or("unknown");
        self.line(&format!("[{index}] {title}"));

        if let Some(error) = &result.error {
            self.line(&format!("  error: {error}"));
        } else if let Some(data) = &result.data {
            let pretty = serde_json::to_string_pretty(data).unwrap_or_default();
            for json_line in pretty.lines() {
                self.line(&format!("  {json_line}"));
            }
        }
    }

    fn reveal_formatted(&mut self, index: usize, formatted_text: &str) {
        self.line(&format!("[{index}] formatted text:"));
        for text_line in formatted_text.lines() {
            self.line(&format!("  {text_line}"));
        }
    }

    fn annotate_score(&mut self, index: usize, outcome: &ScoreResponse) {
        if let Some(score) = outcome.score {
            self.line(&format!("[{index}] GPT Score: {score}%"));
        }
        if let Some(reason) = &outcome.reason {
            self.line(&format!("  Reason: {reason}"));
        }
        if let Some(keyword_score) = outcome.keyword_score {
            self.line(&format!("  Keyword score: {keyword_score}%"));
        }
    }
}
