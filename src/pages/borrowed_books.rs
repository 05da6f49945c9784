// src/pages/borrowed_books.rs

//! Books the connected user borrowed, and the return flow.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{BorrowedBookResponse, FeedbackRequest, PageResponse};
use crate::pages::pagination::{PagedView, Pager};
use crate::pages::{Flash, is_displayable, render_footer, stars};
use crate::services::{BookService, FeedbackService};

pub struct BorrowedBookListPage {
    books: Arc<BookService>,
    feedbacks: Arc<FeedbackService>,
    pager: Pager,
    pub borrowed_books: PageResponse<BorrowedBookResponse>,
    pub selected_book: Option<BorrowedBookResponse>,
    pub feedback_request: FeedbackRequest,
    pub message: Option<Flash>,
}

impl BorrowedBookListPage {
    pub fn new(books: Arc<BookService>, feedbacks: Arc<FeedbackService>, page_size: u32) -> Self {
        Self {
            books,
            feedbacks,
            pager: Pager::new(page_size),
            borrowed_books: PageResponse::default(),
            selected_book: None,
            feedback_request: FeedbackRequest::default(),
            message: None,
        }
    }

    /// Open the return form for a book of the current page.
    pub fn select_for_return(&mut self, book_id: i64) -> Result<()> {
        let book = self
            .borrowed_books
            .iter()
            .find(|b| b.id == Some(book_id))
            .cloned()
            .ok_or_else(|| AppError::validation(format!("Book {book_id} is not in your borrowed list")))?;
        self.feedback_request = FeedbackRequest::new(book_id);
        self.selected_book = Some(book);
        Ok(())
    }

    /// Return the selected book, optionally leaving feedback, then reload.
    pub async fn return_book(&mut self, with_feedback: bool) -> Result<()> {
        self.message = None;
        let book_id = match self.selected_book.as_ref().and_then(|b| b.id) {
            Some(id) => id,
            None => {
                self.message = Some(Flash::error("No book selected"));
                return Ok(());
            }
        };

        if with_feedback {
            let errors = self.feedback_request.validate();
            if !errors.is_empty() {
                self.message = Some(Flash::error(errors.join("\n")));
                return Ok(());
            }
        }

        match self.books.return_borrow_book(book_id).await {
            Ok(_) => {}
            Err(e) if is_displayable(&e) => {
                self.message = Some(Flash::from_error(&e));
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        if with_feedback {
            match self.feedbacks.save_feedback(&self.feedback_request).await {
                Ok(_) => {}
                Err(e) if is_displayable(&e) => {
                    self.message = Some(Flash::from_error(&e));
                }
                Err(e) => return Err(e),
            }
        }

        if self.message.is_none() {
            self.message = Some(Flash::success("Book returned"));
        }
        self.selected_book = None;
        self.fetch().await
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }
        if let Some(book) = &self.selected_book {
            let _ = writeln!(out, "Returning: {} by {}", book.title, book.author_name);
        }
        if self.borrowed_books.is_empty() {
            out.push_str("You have not borrowed any book\n");
        }
        for book in self.borrowed_books.iter() {
            let _ = writeln!(
                out,
                "#{:<5} {} by {} [{}]  {}  returned: {}  approved: {}",
                book.id.unwrap_or_default(),
                book.title,
                book.author_name,
                book.isbn,
                stars(book.rate),
                yes_no(book.returned),
                yes_no(book.return_approved)
            );
        }
        render_footer(&mut out, &self.pager);
        out
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[async_trait]
impl PagedView for BorrowedBookListPage {
    fn pager(&self) -> &Pager {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    async fn fetch(&mut self) -> Result<()> {
        let response = self
            .books
            .find_all_borrowed_books(self.pager.page(), self.pager.size())
            .await?;
        self.pager.update_total(response.total_pages);
        self.borrowed_books = response;
        Ok(())
    }
}
