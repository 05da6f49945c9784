// src/models/page.rs

//! Paged list envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Default for PageResponse<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            number: 0,
            size: 0,
            total_elements: 0,
            total_pages: 0,
            first: true,
            last: true,
        }
    }
}

impl<T> PageResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.content.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_spring_page() {
        let json = r#"{
            "content": [1, 2, 3],
            "number": 1,
            "size": 3,
            "totalElements": 7,
            "totalPages": 3,
            "first": false,
            "last": false
        }"#;
        let page: PageResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 7);
        assert!(!page.first);
    }

    #[test]
    fn test_default_is_empty_single_page() {
        let page: PageResponse<String> = PageResponse::default();
        assert!(page.is_empty());
        assert!(page.first && page.last);
    }
}
