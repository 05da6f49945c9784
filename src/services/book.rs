// src/services/book.rs

//! Book endpoints: catalog, ownership, borrow/return workflow, covers.

use std::path::Path;
use std::sync::Arc;

use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::error::Result;
use crate::models::{BookRequest, BookResponse, BorrowedBookResponse, PageResponse};
use crate::services::api::ApiClient;
use crate::utils::mime_from_path;

/// A cover picture ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl CoverFile {
    /// Read a picture from disk.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("cover")
            .to_string();
        Ok(Self {
            file_name,
            mime: mime_from_path(path).to_string(),
            bytes,
        })
    }

    fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok(Form::new().part("file", part))
    }
}

pub struct BookService {
    api: Arc<ApiClient>,
}

impl BookService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// `POST books`, returns the book id.
    pub async fn save_book(&self, request: &BookRequest) -> Result<i64> {
        let builder = self.api.request(Method::POST, "books").await?.json(request);
        self.api.send_json(builder).await
    }

    /// `GET books/{id}`
    pub async fn find_book_by_id(&self, book_id: i64) -> Result<BookResponse> {
        self.api.get(&format!("books/{book_id}")).await
    }

    /// `GET books`: shareable books of other users.
    pub async fn find_all_books(&self, page: u32, size: u32) -> Result<PageResponse<BookResponse>> {
        self.api.get_page("books", page, size).await
    }

    /// `GET books/owner`
    pub async fn find_all_books_by_owner(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<BookResponse>> {
        self.api.get_page("books/owner", page, size).await
    }

    /// `GET books/borrowed`
    pub async fn find_all_borrowed_books(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<BorrowedBookResponse>> {
        self.api.get_page("books/borrowed", page, size).await
    }

    /// `GET books/returned`
    pub async fn find_all_returned_books(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<BorrowedBookResponse>> {
        self.api.get_page("books/returned", page, size).await
    }

    /// `PATCH books/shareable/{id}`
    pub async fn update_shareable_status(&self, book_id: i64) -> Result<i64> {
        self.patch_for_id(&format!("books/shareable/{book_id}")).await
    }

    /// `PATCH books/archived/{id}`
    pub async fn update_archived_status(&self, book_id: i64) -> Result<i64> {
        self.patch_for_id(&format!("books/archived/{book_id}")).await
    }

    /// `POST books/borrow/{id}`
    pub async fn borrow_book(&self, book_id: i64) -> Result<i64> {
        let builder = self
            .api
            .request(Method::POST, &format!("books/borrow/{book_id}"))
            .await?;
        self.api.send_json(builder).await
    }

    /// `PATCH books/borrow/return/{id}`
    pub async fn return_borrow_book(&self, book_id: i64) -> Result<i64> {
        self.patch_for_id(&format!("books/borrow/return/{book_id}"))
            .await
    }

    /// `PATCH books/borrow/return/approve/{id}`
    pub async fn approve_return_borrow_book(&self, book_id: i64) -> Result<i64> {
        self.patch_for_id(&format!("books/borrow/return/approve/{book_id}"))
            .await
    }

    /// `POST books/cover/{id}` as multipart, field `file`.
    pub async fn upload_book_cover_picture(&self, book_id: i64, cover: CoverFile) -> Result<()> {
        log::debug!(
            "Uploading cover {} ({} bytes) for book {}",
            cover.file_name,
            cover.bytes.len(),
            book_id
        );
        let form = cover.into_form()?;
        let builder = self
            .api
            .request(Method::POST, &format!("books/cover/{book_id}"))
            .await?
            .multipart(form);
        self.api.send_empty(builder).await
    }

    async fn patch_for_id(&self, path: &str) -> Result<i64> {
        let builder = self.api.request(Method::PATCH, path).await?;
        self.api.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cover_file_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dune.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let cover = CoverFile::read(&path).await.unwrap();
        assert_eq!(cover.file_name, "dune.png");
        assert_eq!(cover.mime, "image/png");
        assert_eq!(cover.bytes.len(), 4);
    }

    #[tokio::test]
    async fn test_cover_file_missing() {
        assert!(CoverFile::read("/no/such/cover.jpg").await.is_err());
    }
}
