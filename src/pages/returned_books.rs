// src/pages/returned_books.rs

//! Owner's view of lent books, where returns get approved.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BorrowedBookResponse, PageResponse};
use crate::pages::borrowed_books::yes_no;
use crate::pages::pagination::{PagedView, Pager};
use crate::pages::{Flash, is_displayable, render_footer, stars};
use crate::services::BookService;

pub struct ReturnedBooksPage {
    books: Arc<BookService>,
    pager: Pager,
    pub returned_books: PageResponse<BorrowedBookResponse>,
    pub message: Option<Flash>,
}

impl ReturnedBooksPage {
    pub fn new(books: Arc<BookService>, page_size: u32) -> Self {
        Self {
            books,
            pager: Pager::new(page_size),
            returned_books: PageResponse::default(),
            message: None,
        }
    }

    /// Approve the return of a book listed on the current page.
    ///
    /// A book missing from the page, or not handed back yet, is refused
    /// locally.
    pub async fn approve_book_return(&mut self, book_id: i64) -> Result<()> {
        let refusal = match self.returned_books.iter().find(|b| b.id == Some(book_id)) {
            None => Some(format!("Book {book_id} is not in your returned list")),
            Some(book) if !book.returned => Some("The book has not been returned yet".to_string()),
            Some(_) => None,
        };
        if let Some(refusal) = refusal {
            self.message = Some(Flash::error(refusal));
            return Ok(());
        }

        match self.books.approve_return_borrow_book(book_id).await {
            Ok(_) => {
                self.message = Some(Flash::success("Book return approved"));
                self.fetch().await
            }
            Err(e) if is_displayable(&e) => {
                self.message = Some(Flash::from_error(&e));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }
        if self.returned_books.is_empty() {
            out.push_str("None of your books is borrowed\n");
        }
        for book in self.returned_books.iter() {
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

#[async_trait]
impl PagedView for ReturnedBooksPage {
    fn pager(&self) -> &Pager {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    async fn fetch(&mut self) -> Result<()> {
        let response = self
            .books
            .find_all_returned_books(self.pager.page(), self.pager.size())
            .await?;
        self.pager.update_total(response.total_pages);
        self.returned_books = response;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ApiClient;

    fn page_with(books: Vec<BorrowedBookResponse>) -> ReturnedBooksPage {
        // Nothing listens here; the refused path never reaches the network.
        let api = ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9/api/v1").unwrap();
        let mut page = ReturnedBooksPage::new(Arc::new(BookService::new(Arc::new(api))), 5);
        page.returned_books.content = books;
        page
    }

    #[tokio::test]
    async fn test_unreturned_book_is_refused_locally() {
        let mut page = page_with(vec![BorrowedBookResponse {
            id: Some(4),
            title: "Dune".to_string(),
            returned: false,
            ..BorrowedBookResponse::default()
        }]);

        page.approve_book_return(4).await.unwrap();
        let message = page.message.as_ref().unwrap();
        assert!(message.is_error());
        assert_eq!(message.message, "The book has not been returned yet");
    }

    #[tokio::test]
    async fn test_unknown_book_is_refused_locally() {
        let mut page = page_with(Vec::new());
        page.approve_book_return(99).await.unwrap();
        let message = page.message.as_ref().unwrap();
        assert!(message.is_error());
        assert_eq!(message.message, "Book 99 is not in your returned list");
    }

    #[test]
    fn test_render_lists_flags() {
        let page = page_with(vec![BorrowedBookResponse {
            id: Some(4),
            title: "Dune".to_string(),
            author_name: "Frank Herbert".to_string(),
            returned: true,
            ..BorrowedBookResponse::default()
        }]);
        let out = page.render();
        assert!(out.contains("Dune by Frank Herbert"));
        assert!(out.contains("returned: yes  approved: no"));
    }
}
