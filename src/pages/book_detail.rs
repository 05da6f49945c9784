// src/pages/book_detail.rs

//! One book with its paged feedback.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BookResponse, FeedbackResponse, PageResponse};
use crate::pages::pagination::{PagedView, Pager};
use crate::pages::{render_footer, stars};
use crate::services::{BookService, FeedbackService};

pub struct BookDetailPage {
    books: Arc<BookService>,
    feedbacks: Arc<FeedbackService>,
    book_id: i64,
    pager: Pager,
    pub book: BookResponse,
    pub feedbacks_page: PageResponse<FeedbackResponse>,
}

impl BookDetailPage {
    pub fn new(
        books: Arc<BookService>,
        feedbacks: Arc<FeedbackService>,
        book_id: i64,
        page_size: u32,
    ) -> Self {
        Self {
            books,
            feedbacks,
            book_id,
            pager: Pager::new(page_size),
            book: BookResponse::default(),
            feedbacks_page: PageResponse::default(),
        }
    }

    /// Load the book, then its first page of feedback.
    pub async fn load(&mut self) -> Result<()> {
        self.book = self.books.find_book_by_id(self.book_id).await?;
        self.fetch().await
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let book = &self.book;
        let _ = writeln!(out, "{} by {}", book.title, book.author_name);
        let _ = writeln!(out, "ISBN {}  owner: {}", book.isbn, book.owner);
        let _ = writeln!(out, "{}", stars(book.rate));
        if book.cover_data_url().is_some() {
            out.push_str("(cover available)\n");
        }
        if !book.synopsis.is_empty() {
            let _ = writeln!(out, "\n{}\n", book.synopsis);
        }

        out.push_str("Feedback:\n");
        if self.feedbacks_page.is_empty() {
            out.push_str("  no feedback yet\n");
        }
        for feedback in self.feedbacks_page.iter() {
            let mine = if feedback.own_feedback { " (you)" } else { "" };
            let _ = writeln!(out, "  {}{}  {}", stars(feedback.note), mine, feedback.comment);
        }
        render_footer(&mut out, &self.pager);
        out
    }
}

#[async_trait]
impl PagedView for BookDetailPage {
    fn pager(&self) -> &Pager {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    async fn fetch(&mut self) -> Result<()> {
        let response = self
            .feedbacks
            .find_all_feedback_by_book(self.book_id, self.pager.page(), self.pager.size())
            .await?;
        self.pager.update_total(response.total_pages);
        self.feedbacks_page = response;
        Ok(())
    }
}
