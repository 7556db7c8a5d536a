//! Rendering seam — the surface the controller draws result cards on.
//!
//! The controller never touches an output stream directly; it drives this
//! trait, so the sequencing logic is testable against a recording
//! implementation and the binary ships a terminal-backed one.

pub mod terminal;

use crate::models::{ScoreResponse, UploadResult};

/// One rendered card per upload result, addressed by its index in the
/// last-received results array.
pub trait Renderer: Send {
    /// Drops all rendered cards and any status line.
    fn clear(&mut self);

    /// Replaces the status line.
    fn set_status(&mut self, status: &str);

    /// Attention-demanding message (the original surface used a modal alert).
    fn alert(&mut self, message: &str);

    /// Renders one card: title (filename or "unknown"), then either the
    /// entry's error or the pretty-printed parsed data.
    fn render_card(&mut self, index: usize, result: &UploadResult);

    /// Shows the formatted-text view of a card. Called at most once per card.
    fn reveal_formatted(&mut self, index: usize, formatted_text: &str);

    /// Writes the score annotation into a card's score region. Only called
    /// for responses that carry a numeric score.
    fn annotate_score(&mut self, index: usize, outcome: &ScoreResponse);
}
