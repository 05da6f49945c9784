// src/pages/articles.rs

//! Article and theme views.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Article, Theme};
use crate::pages::{Flash, is_displayable, render_errors};
use crate::services::ArticleService;

/// Every article, or those of one theme.
pub struct ArticleListPage {
    articles: Arc<ArticleService>,
    pub theme_id: Option<i64>,
    pub theme: Option<Theme>,
    pub article_list: Vec<Article>,
}

impl ArticleListPage {
    pub fn new(articles: Arc<ArticleService>, theme_id: Option<i64>) -> Self {
        Self {
            articles,
            theme_id,
            theme: None,
            article_list: Vec::new(),
        }
    }

    pub async fn fetch(&mut self) -> Result<()> {
        match self.theme_id {
            Some(theme_id) => {
                self.theme = Some(self.articles.get_theme(theme_id).await?);
                self.article_list = self.articles.get_articles_by_theme(theme_id).await?;
            }
            None => {
                self.theme = None;
                self.article_list = self.articles.get_articles().await?;
            }
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(theme) = &self.theme {
            let _ = writeln!(out, "Theme: {}", theme.name);
        }
        if self.article_list.is_empty() {
            out.push_str("No articles\n");
        }
        for article in &self.article_list {
            let _ = writeln!(out, "#{:<5} {}", article.id.unwrap_or_default(), article.title);
        }
        out
    }
}

/// A single article.
pub struct ArticleDetailPage {
    articles: Arc<ArticleService>,
    pub article: Article,
}

impl ArticleDetailPage {
    pub fn new(articles: Arc<ArticleService>) -> Self {
        Self {
            articles,
            article: Article::default(),
        }
    }

    pub async fn load(&mut self, article_id: i64) -> Result<()> {
        self.article = self.articles.get_article(article_id).await?;
        Ok(())
    }

    pub fn render(&self) -> String {
        format!("{}\n\n{}\n", self.article.title, self.article.content)
    }
}

/// Article editor: creates when the article has no id, edits otherwise.
pub struct CreateArticlePage {
    articles: Arc<ArticleService>,
    pub article: Article,
    pub error_msg: Vec<String>,
    pub message: Option<Flash>,
}

impl CreateArticlePage {
    pub fn new(articles: Arc<ArticleService>) -> Self {
        Self {
            articles,
            article: Article::default(),
            error_msg: Vec::new(),
            message: None,
        }
    }

    /// Pre-fill the editor from a stored article.
    pub async fn load(&mut self, article_id: i64) -> Result<()> {
        self.article = self.articles.get_article(article_id).await?;
        Ok(())
    }

    /// Create or update the article. Returns whether the server accepted it.
    pub async fn submit(&mut self) -> Result<bool> {
        self.error_msg.clear();
        self.message = None;

        let local_errors = self.article.validate();
        if !local_errors.is_empty() {
            self.error_msg = local_errors;
            return Ok(false);
        }

        let result = if self.article.id.is_some() {
            self.articles.edit_article(&self.article).await
        } else {
            self.articles.create_article(&self.article).await
        };

        match result {
            Ok(saved) => {
                let verb = if self.article.id.is_some() { "updated" } else { "created" };
                self.message = Some(Flash::success(format!("Article {verb}: {}", saved.title)));
                self.article = saved;
                Ok(true)
            }
            Err(e) if is_displayable(&e) => {
                self.error_msg = e.messages();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn delete(&mut self, article_id: i64) -> Result<()> {
        self.message = None;
        match self.articles.delete_article(article_id).await {
            Ok(()) => self.message = Some(Flash::success(format!("Article {article_id} deleted"))),
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
        render_errors(&mut out, &self.error_msg);
        out
    }
}

/// Theme list with add, rename and delete.
pub struct ThemesPage {
    articles: Arc<ArticleService>,
    pub themes: Vec<Theme>,
    pub message: Option<Flash>,
}

impl ThemesPage {
    pub fn new(articles: Arc<ArticleService>) -> Self {
        Self {
            articles,
            themes: Vec::new(),
            message: None,
        }
    }

    pub async fn fetch(&mut self) -> Result<()> {
        self.themes = self.articles.get_themes().await?;
        Ok(())
    }

    pub async fn add_theme(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            self.message = Some(Flash::error("Theme name is mandatory"));
            return Ok(());
        }
        let outcome = self.articles.add_theme(name.trim()).await.map(|theme| {
            Flash::success(format!("Theme added: {}", theme.name))
        });
        self.settle(outcome).await
    }

    pub async fn edit_theme(&mut self, theme_id: i64, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            self.message = Some(Flash::error("Theme name is mandatory"));
            return Ok(());
        }
        let outcome = self
            .articles
            .edit_theme(theme_id, name.trim())
            .await
            .map(|()| Flash::success(format!("Theme {theme_id} renamed")));
        self.settle(outcome).await
    }

    pub async fn delete_theme(&mut self, theme_id: i64) -> Result<()> {
        let outcome = self
            .articles
            .delete_theme(theme_id)
            .await
            .map(|()| Flash::success(format!("Theme {theme_id} deleted")));
        self.settle(outcome).await
    }

    /// Record the outcome of a change and reload the list after a success.
    async fn settle(&mut self, outcome: Result<Flash>) -> Result<()> {
        match outcome {
            Ok(flash) => {
                self.message = Some(flash);
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
        if self.themes.is_empty() {
            out.push_str("No themes\n");
        }
        for theme in &self.themes {
            let _ = writeln!(
                out,
                "#{:<5} {} ({} articles)",
                theme.id.unwrap_or_default(),
                theme.name,
                theme.articles.len()
            );
        }
        out
    }
}
