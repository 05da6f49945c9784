// src/services/article.rs

//! Article and theme endpoints.

use std::sync::Arc;

use reqwest::Method;

use crate::error::{AppError, Result};
use crate::models::{Article, Theme, ThemeRequest};
use crate::services::api::ApiClient;

pub struct ArticleService {
    api: Arc<ApiClient>,
}

impl ArticleService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    // --- Themes ---

    /// `GET themes`
    pub async fn get_themes(&self) -> Result<Vec<Theme>> {
        self.api.get("themes").await
    }

    /// `GET themes/{id}`
    pub async fn get_theme(&self, theme_id: i64) -> Result<Theme> {
        self.api.get(&format!("themes/{theme_id}")).await
    }

    /// `GET themes/{id}/articles`
    pub async fn get_articles_by_theme(&self, theme_id: i64) -> Result<Vec<Article>> {
        self.api.get(&format!("themes/{theme_id}/articles")).await
    }

    /// `POST themes`
    pub async fn add_theme(&self, name: &str) -> Result<Theme> {
        let builder = self
            .api
            .request(Method::POST, "themes")
            .await?
            .json(&ThemeRequest::new(name));
        self.api.send_json(builder).await
    }

    /// `PUT themes/{id}`
    pub async fn edit_theme(&self, theme_id: i64, name: &str) -> Result<()> {
        let builder = self
            .api
            .request(Method::PUT, &format!("themes/{theme_id}"))
            .await?
            .json(&ThemeRequest::new(name));
        self.api.send_empty(builder).await
    }

    /// `DELETE themes/{id}`
    pub async fn delete_theme(&self, theme_id: i64) -> Result<()> {
        self.api.delete(&format!("themes/{theme_id}")).await
    }

    // --- Articles ---

    /// `GET articles`
    pub async fn get_articles(&self) -> Result<Vec<Article>> {
        self.api.get("articles").await
    }

    /// `GET articles/{id}`
    pub async fn get_article(&self, article_id: i64) -> Result<Article> {
        self.api.get(&format!("articles/{article_id}")).await
    }

    /// `POST articles`
    pub async fn create_article(&self, article: &Article) -> Result<Article> {
        let builder = self
            .api
            .request(Method::POST, "articles")
            .await?
            .json(article);
        self.api.send_json(builder).await
    }

    /// `PUT articles/{id}`; the article must carry its id.
    pub async fn edit_article(&self, article: &Article) -> Result<Article> {
        let id = article
            .id
            .ok_or_else(|| AppError::validation("Article id is required for editing"))?;
        let builder = self
            .api
            .request(Method::PUT, &format!("articles/{id}"))
            .await?
            .json(article);
        self.api.send_json(builder).await
    }

    /// `DELETE articles/{id}`
    pub async fn delete_article(&self, article_id: i64) -> Result<()> {
        self.api.delete(&format!("articles/{article_id}")).await
    }
}
