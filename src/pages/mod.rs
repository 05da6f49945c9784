//! Views of the client.
//!
//! Each page owns its view-local state (form fields, the last response,
//! messages) and exposes the actions a user can take on it. Actions call the
//! services and assign the result to state; `render` turns state into text.

mod account;
mod articles;
mod book_detail;
mod book_list;
mod borrowed_books;
mod login;
mod manage_book;
mod menu;
mod my_books;
pub mod pagination;
mod returned_books;

use std::fmt::Write as _;

pub use account::{ActivateAccountPage, RegisterPage};
pub use articles::{ArticleDetailPage, ArticleListPage, CreateArticlePage, ThemesPage};
pub use book_detail::BookDetailPage;
pub use book_list::BookListPage;
pub use borrowed_books::BorrowedBookListPage;
pub use login::LoginPage;
pub use manage_book::ManageBookPage;
pub use menu::MenuPage;
pub use my_books::MyBooksPage;
pub use pagination::{PagedView, Pager};
pub use returned_books::ReturnedBooksPage;

use crate::error::AppError;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// One-line outcome shown above a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Error flash built from whatever the server said.
    pub fn from_error(err: &AppError) -> Self {
        Self::error(err.messages().join("\n"))
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl std::fmt::Display for Flash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            Level::Success => write!(f, "✓ {}", self.message),
            Level::Error => write!(f, "✗ {}", self.message),
        }
    }
}

/// Whether an error is the server rejecting the request, which a view
/// displays, as opposed to a transport failure, which it propagates.
pub(crate) fn is_displayable(err: &AppError) -> bool {
    matches!(err, AppError::Api { .. } | AppError::Validation(_))
}

/// Render a list of error messages, one per line.
pub(crate) fn render_errors(out: &mut String, errors: &[String]) {
    for error in errors {
        let _ = writeln!(out, "  ! {error}");
    }
}

/// Render the pager footer.
pub(crate) fn render_footer(out: &mut String, pager: &Pager) {
    let mut nav = Vec::new();
    if !pager.is_first_page() {
        nav.push("<< first");
        nav.push("< previous");
    }
    if !pager.is_last_page() {
        nav.push("next >");
        nav.push("last >>");
    }
    let _ = write!(out, "{}", pager.label());
    if !nav.is_empty() {
        let _ = write!(out, "  [{}]", nav.join(" | "));
    }
    out.push('\n');
}

/// Star rendering of a 0..=5 note, rounded to the nearest half.
pub fn stars(rate: f64) -> String {
    let halves = (rate.clamp(0.0, 5.0) * 2.0).round() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5 - full - half;
    format!(
        "{}{}{} {:.1}",
        "★".repeat(full),
        "½".repeat(half),
        "☆".repeat(empty),
        rate
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorResponse;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0.0), "☆☆☆☆☆ 0.0");
        assert_eq!(stars(3.5), "★★★½☆ 3.5");
        assert_eq!(stars(9.0), "★★★★★ 9.0");
    }

    #[test]
    fn test_flash_from_api_error() {
        let err = AppError::Api {
            status: 400,
            body: ErrorResponse {
                error: Some("You cannot borrow your own book".to_string()),
                ..ErrorResponse::default()
            },
        };
        let flash = Flash::from_error(&err);
        assert!(flash.is_error());
        assert_eq!(flash.to_string(), "✗ You cannot borrow your own book");
    }

    #[test]
    fn test_footer_on_middle_page() {
        let mut pager = Pager::new(5);
        pager.update_total(3);
        pager.next();
        let mut out = String::new();
        render_footer(&mut out, &pager);
        assert!(out.starts_with("Page 2 of 3"));
        assert!(out.contains("next >"));
        assert!(out.contains("< previous"));
    }

    #[test]
    fn test_displayable_errors() {
        assert!(is_displayable(&AppError::validation("x")));
        assert!(!is_displayable(&AppError::config("x")));
    }
}
