// src/pages/my_books.rs

//! Books owned by the connected user.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BookResponse, PageResponse};
use crate::pages::pagination::{PagedView, Pager};
use crate::pages::{Flash, is_displayable, render_footer, stars};
use crate::services::BookService;

pub struct MyBooksPage {
    books: Arc<BookService>,
    pager: Pager,
    pub book_response: PageResponse<BookResponse>,
    pub message: Option<Flash>,
}

impl MyBooksPage {
    pub fn new(books: Arc<BookService>, page_size: u32) -> Self {
        Self {
            books,
            pager: Pager::new(page_size),
            book_response: PageResponse::default(),
            message: None,
        }
    }

    fn book_mut(&mut self, book_id: i64) -> Option<&mut BookResponse> {
        self.book_response
            .iter_mut()
            .find(|b| b.id == Some(book_id))
    }

    /// Toggle the archived flag. The local copy flips only once the server
    /// has accepted the change.
    pub async fn archive_book(&mut self, book_id: i64) -> Result<()> {
        self.message = None;
        match self.books.update_archived_status(book_id).await {
            Ok(_) => {
                if let Some(book) = self.book_mut(book_id) {
                    book.archived = !book.archived;
                }
                self.message = Some(Flash::success("Archived status updated"));
            }
            Err(e) if is_displayable(&e) => self.message = Some(Flash::from_error(&e)),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Toggle the shareable flag.
    pub async fn share_book(&mut self, book_id: i64) -> Result<()> {
        self.message = None;
        match self.books.update_shareable_status(book_id).await {
            Ok(_) => {
                if let Some(book) = self.book_mut(book_id) {
                    book.shareable = !book.shareable;
                }
                self.message = Some(Flash::success("Shareable status updated"));
            }
            Err(e) if is_displayable(&e) => self.message = Some(Flash::from_error(&e)),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }
        if self.book_response.is_empty() {
            out.push_str("You have no books yet. Add one with `booknet books save`.\n");
        }
        for book in self.book_response.iter() {
            let mut flags = Vec::new();
            if book.shareable {
                flags.push("shared");
            }
            if book.archived {
                flags.push("archived");
            }
            let _ = writeln!(
                out,
                "#{:<5} {} by {} [{}]  {}  {}",
                book.id.unwrap_or_default(),
                book.title,
                book.author_name,
                book.isbn,
                stars(book.rate),
                flags.join(", ")
            );
        }
        render_footer(&mut out, &self.pager);
        out
    }
}

#[async_trait]
impl PagedView for MyBooksPage {
    fn pager(&self) -> &Pager {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    async fn fetch(&mut self) -> Result<()> {
        let response = self
            .books
            .find_all_books_by_owner(self.pager.page(), self.pager.size())
            .await?;
        self.pager.update_total(response.total_pages);
        self.book_response = response;
        Ok(())
    }
}
