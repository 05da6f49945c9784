// src/models/book.rs

//! Book payloads exchanged with the `books` endpoints.

use serde::{Deserialize, Serialize};

/// Form payload for creating or updating a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    /// Present when editing an existing book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub title: String,

    pub author_name: String,

    pub isbn: String,

    pub synopsis: String,

    #[serde(default)]
    pub shareable: bool,
}

impl BookRequest {
    /// Check the fields the server marks as mandatory.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Title is mandatory".to_string());
        }
        if self.author_name.trim().is_empty() {
            errors.push("Author name is mandatory".to_string());
        }
        if self.isbn.trim().is_empty() {
            errors.push("ISBN is mandatory".to_string());
        }
        if self.synopsis.trim().is_empty() {
            errors.push("Synopsis is mandatory".to_string());
        }
        errors
    }
}

impl From<&BookResponse> for BookRequest {
    fn from(book: &BookResponse) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author_name: book.author_name.clone(),
            isbn: book.isbn.clone(),
            synopsis: book.synopsis.clone(),
            shareable: book.shareable,
        }
    }
}

/// A book as listed in the catalog or owned by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookResponse {
    pub id: Option<i64>,
    pub title: String,
    pub author_name: String,
    pub isbn: String,
    pub synopsis: String,
    /// Owner display name
    pub owner: String,
    /// Cover picture, base64 encoded by the server
    pub cover: Option<String>,
    /// Average feedback note
    pub rate: f64,
    pub archived: bool,
    pub shareable: bool,
}

impl BookResponse {
    /// Data URL for the cover, as an image tag would consume it.
    pub fn cover_data_url(&self) -> Option<String> {
        self.cover
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!("data:image/jpg;base64,{c}"))
    }
}

/// A book the user borrowed, or one of theirs that was borrowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorrowedBookResponse {
    pub id: Option<i64>,
    pub title: String,
    pub author_name: String,
    pub isbn: String,
    pub rate: f64,
    pub returned: bool,
    pub return_approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_response_tolerates_missing_fields() {
        let book: BookResponse = serde_json::from_str(r#"{"id": 3, "title": "Dune"}"#).unwrap();
        assert_eq!(book.id, Some(3));
        assert_eq!(book.title, "Dune");
        assert!(!book.shareable);
        assert!(book.cover_data_url().is_none());
    }

    #[test]
    fn test_book_request_uses_camel_case() {
        let request = BookRequest {
            title: "Dune".to_string(),
            author_name: "Frank Herbert".to_string(),
            ..BookRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["authorName"], "Frank Herbert");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_book_request_validate_lists_every_blank_field() {
        let request = BookRequest {
            title: "Dune".to_string(),
            ..BookRequest::default()
        };
        assert_eq!(request.validate().len(), 3);
    }

    #[test]
    fn test_request_from_response_keeps_id_and_flags() {
        let book = BookResponse {
            id: Some(9),
            title: "Dune".to_string(),
            shareable: true,
            cover: Some("AAAA".to_string()),
            ..BookResponse::default()
        };
        let request = BookRequest::from(&book);
        assert_eq!(request.id, Some(9));
        assert!(request.shareable);
        assert_eq!(
            book.cover_data_url().as_deref(),
            Some("data:image/jpg;base64,AAAA")
        );
    }
}
