// src/models/article.rs

//! Articles and the themes that group them.

use serde::{Deserialize, Serialize};

/// A published article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    /// Rich text body (HTML)
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<i64>,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Title is mandatory".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("Content is mandatory".to_string());
        }
        errors
    }
}

/// A named grouping of articles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub id: Option<i64>,
    pub name: String,
    pub articles: Vec<Article>,
}

/// Body for creating or renaming a theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeRequest {
    pub name: String,
}

impl ThemeRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
