// src/pages/manage_book.rs

//! Create or edit a book, with an optional cover picture.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::models::BookRequest;
use crate::pages::{is_displayable, render_errors};
use crate::services::{BookService, CoverFile};

pub struct ManageBookPage {
    books: Arc<BookService>,
    pub book_request: BookRequest,
    pub error_msg: Vec<String>,
    pub selected_cover: Option<CoverFile>,
    pub saved_id: Option<i64>,
}

impl ManageBookPage {
    pub fn new(books: Arc<BookService>) -> Self {
        Self {
            books,
            book_request: BookRequest::default(),
            error_msg: Vec::new(),
            selected_cover: None,
            saved_id: None,
        }
    }

    /// Pre-fill the form from an existing book.
    pub async fn load(&mut self, book_id: i64) -> Result<()> {
        let book = self.books.find_book_by_id(book_id).await?;
        self.book_request = BookRequest::from(&book);
        Ok(())
    }

    /// Pick the cover to upload with the next save.
    pub async fn select_cover(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let cover = CoverFile::read(path).await?;
        log::debug!("Selected cover {} ({})", cover.file_name, cover.mime);
        self.selected_cover = Some(cover);
        Ok(())
    }

    /// Save the book, then upload the selected cover if any.
    ///
    /// Returns the book id, or `None` when the form was rejected.
    pub async fn save_book(&mut self) -> Result<Option<i64>> {
        self.error_msg.clear();
        self.saved_id = None;

        let local_errors = self.book_request.validate();
        if !local_errors.is_empty() {
            self.error_msg = local_errors;
            return Ok(None);
        }

        let book_id = match self.books.save_book(&self.book_request).await {
            Ok(id) => id,
            Err(e) if is_displayable(&e) => {
                self.error_msg = e.messages();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if let Some(cover) = self.selected_cover.take() {
            if let Err(e) = self.books.upload_book_cover_picture(book_id, cover).await {
                if !is_displayable(&e) {
                    return Err(e);
                }
                self.error_msg = e.messages();
            }
        }

        log::info!("Saved book {} ({})", book_id, self.book_request.title);
        self.saved_id = Some(book_id);
        Ok(Some(book_id))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(id) = self.saved_id {
            let _ = writeln!(out, "✓ Book #{id} saved: {}", self.book_request.title);
            if !self.error_msg.is_empty() {
                out.push_str("Cover upload failed:\n");
            }
        } else if !self.error_msg.is_empty() {
            out.push_str("Book not saved:\n");
        }
        render_errors(&mut out, &self.error_msg);
        out
    }
}
