// src/models/feedback.rs

//! Feedback left on a book after returning it.

use serde::{Deserialize, Serialize};

/// Highest note a reader can give.
pub const MAX_NOTE: f64 = 5.0;

/// Feedback submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Note between 0 and 5
    pub note: f64,
    pub comment: String,
    pub book_id: i64,
}

impl FeedbackRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
            ..Self::default()
        }
    }

    /// Check the bounds the server enforces.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(0.0..=MAX_NOTE).contains(&self.note) {
            errors.push(format!("Note must be between 0 and {MAX_NOTE}"));
        }
        if self.comment.trim().is_empty() {
            errors.push("Comment is mandatory".to_string());
        }
        if self.book_id <= 0 {
            errors.push("Book is mandatory".to_string());
        }
        errors
    }
}

/// Feedback as listed for a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackResponse {
    pub note: f64,
    pub comment: String,
    /// Whether the connected user wrote it
    pub own_feedback: bool,
}
