// src/pages/book_list.rs

//! Catalog of books shared by other members.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BookResponse, PageResponse};
use crate::pages::pagination::{PagedView, Pager};
use crate::pages::{Flash, is_displayable, render_footer, stars};
use crate::services::BookService;

pub struct BookListPage {
    books: Arc<BookService>,
    pager: Pager,
    pub book_response: PageResponse<BookResponse>,
    pub message: Option<Flash>,
}

impl BookListPage {
    pub fn new(books: Arc<BookService>, page_size: u32) -> Self {
        Self {
            books,
            pager: Pager::new(page_size),
            book_response: PageResponse::default(),
            message: None,
        }
    }

    /// Borrow a book from the catalog and report the outcome.
    pub async fn borrow_book(&mut self, book_id: i64) -> Result<()> {
        self.message = None;
        match self.books.borrow_book(book_id).await {
            Ok(_) => {
                self.message = Some(Flash::success("Book successfully added to your list"));
            }
            Err(e) if is_displayable(&e) => {
                self.message = Some(Flash::from_error(&e));
            }
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
            out.push_str("No books available\n");
        }
        for book in self.book_response.iter() {
            let _ = writeln!(
                out,
                "#{:<5} {} by {} [{}]  {}  owner: {}",
                book.id.unwrap_or_default(),
                book.title,
                book.author_name,
                book.isbn,
                stars(book.rate),
                book.owner
            );
        }
        render_footer(&mut out, &self.pager);
        out
    }
}

#[async_trait]
impl PagedView for BookListPage {
    fn pager(&self) -> &Pager {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    async fn fetch(&mut self) -> Result<()> {
        let response = self
            .books
            .find_all_books(self.pager.page(), self.pager.size())
            .await?;
        self.pager.update_total(response.total_pages);
        self.book_response = response;
        Ok(())
    }
}
