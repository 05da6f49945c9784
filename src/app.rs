// src/app.rs

//! Wiring: builds the session, the HTTP client and the services from config.

use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "keycloak")]
use crate::auth::KeycloakService;
use crate::auth::{Session, TokenService};
use crate::error::Result;
use crate::models::{AuthProvider, Config};
use crate::pages::{
    ActivateAccountPage, ArticleDetailPage, ArticleListPage, BookDetailPage, BookListPage,
    BorrowedBookListPage, CreateArticlePage, LoginPage, ManageBookPage, MenuPage, MyBooksPage,
    RegisterPage, ReturnedBooksPage, ThemesPage,
};
use crate::services::{
    ApiClient, ArticleService, AuthenticationService, BookService, FeedbackService,
};
use crate::storage::{KeyValueStore, LocalStorage};
use crate::utils::http;

/// Everything a command needs, built once per run.
pub struct App {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub tokens: Arc<TokenService>,
    #[cfg(feature = "keycloak")]
    pub keycloak: Arc<KeycloakService>,
    pub session: Arc<dyn Session>,
    pub api: Arc<ApiClient>,
    pub auth: Arc<AuthenticationService>,
    pub books: Arc<BookService>,
    pub feedbacks: Arc<FeedbackService>,
    pub articles: Arc<ArticleService>,
}

impl App {
    /// Build with the session file under `storage_dir`.
    pub fn open(config: Config, storage_dir: impl AsRef<Path>) -> Result<Self> {
        let store = Arc::new(LocalStorage::new(storage_dir, &config.auth.storage_file));
        Self::new(config, store)
    }

    /// Build on top of an arbitrary store.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        config.validate()?;
        let client = http::create_client(&config.http)?;

        let tokens = Arc::new(
            TokenService::new(Arc::clone(&store)).with_leeway(config.auth.expiry_leeway_secs),
        );

        let api = ApiClient::new(client, &config.api.root_url)?;

        #[cfg(feature = "keycloak")]
        let keycloak = Arc::new(KeycloakService::new(
            api.http_client().clone(),
            config.keycloak.clone(),
            Arc::clone(&store),
        ));

        let session: Arc<dyn Session> = match config.auth.provider {
            AuthProvider::Local => tokens.clone(),
            #[cfg(feature = "keycloak")]
            AuthProvider::Keycloak => keycloak.clone(),
            #[cfg(not(feature = "keycloak"))]
            AuthProvider::Keycloak => {
                return Err(crate::error::AppError::config(
                    "auth.provider = \"keycloak\" needs the `keycloak` feature",
                ));
            }
        };
        log::debug!("Using {:?} session", config.auth.provider);

        let api = Arc::new(api.with_session(Arc::clone(&session)));

        Ok(Self {
            auth: Arc::new(AuthenticationService::new(Arc::clone(&api))),
            books: Arc::new(BookService::new(Arc::clone(&api))),
            feedbacks: Arc::new(FeedbackService::new(Arc::clone(&api))),
            articles: Arc::new(ArticleService::new(Arc::clone(&api))),
            config,
            store,
            tokens,
            #[cfg(feature = "keycloak")]
            keycloak,
            session,
            api,
        })
    }

    /// Fail unless a valid session exists.
    pub async fn require_login(&self) -> Result<()> {
        crate::auth::authorize(self.session.as_ref()).await
    }

    /// Whether the local login flow is in use.
    pub fn uses_local_login(&self) -> bool {
        self.config.auth.provider == AuthProvider::Local
    }

    fn page_size(&self) -> u32 {
        self.config.pagination.page_size
    }

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(Arc::clone(&self.auth), Arc::clone(&self.tokens))
    }

    pub fn register_page(&self) -> RegisterPage {
        RegisterPage::new(Arc::clone(&self.auth))
    }

    pub fn activate_account_page(&self) -> ActivateAccountPage {
        ActivateAccountPage::new(Arc::clone(&self.auth))
    }

    pub fn menu_page(&self) -> MenuPage {
        MenuPage::new(Arc::clone(&self.session))
    }

    pub fn book_list_page(&self) -> BookListPage {
        BookListPage::new(Arc::clone(&self.books), self.page_size())
    }

    pub fn my_books_page(&self) -> MyBooksPage {
        MyBooksPage::new(Arc::clone(&self.books), self.page_size())
    }

    pub fn manage_book_page(&self) -> ManageBookPage {
        ManageBookPage::new(Arc::clone(&self.books))
    }

    pub fn borrowed_books_page(&self) -> BorrowedBookListPage {
        BorrowedBookListPage::new(
            Arc::clone(&self.books),
            Arc::clone(&self.feedbacks),
            self.page_size(),
        )
    }

    pub fn returned_books_page(&self) -> ReturnedBooksPage {
        ReturnedBooksPage::new(Arc::clone(&self.books), self.page_size())
    }

    pub fn book_detail_page(&self, book_id: i64) -> BookDetailPage {
        BookDetailPage::new(
            Arc::clone(&self.books),
            Arc::clone(&self.feedbacks),
            book_id,
            self.page_size(),
        )
    }

    pub fn article_list_page(&self, theme_id: Option<i64>) -> ArticleListPage {
        ArticleListPage::new(Arc::clone(&self.articles), theme_id)
    }

    pub fn article_detail_page(&self) -> ArticleDetailPage {
        ArticleDetailPage::new(Arc::clone(&self.articles))
    }

    pub fn create_article_page(&self) -> CreateArticlePage {
        CreateArticlePage::new(Arc::clone(&self.articles))
    }

    pub fn themes_page(&self) -> ThemesPage {
        ThemesPage::new(Arc::clone(&self.articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::test_tokens::token_expiring_in;
    use crate::error::AppError;
    use crate::storage::MemoryStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_guard_blocks_without_token() {
        let app = App::new(Config::default(), Arc::new(MemoryStorage::new())).unwrap();
        let err = app.require_login().await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_guard_passes_with_fresh_token() {
        let app = App::new(Config::default(), Arc::new(MemoryStorage::new())).unwrap();
        app.tokens.set_token(&token_expiring_in(3600)).await.unwrap();
        app.require_login().await.unwrap();
        assert!(app.uses_local_login());
    }

    #[tokio::test]
    async fn test_open_persists_session_under_storage_dir() {
        let tmp = TempDir::new().unwrap();
        let token = token_expiring_in(3600);
        {
            let app = App::open(Config::default(), tmp.path()).unwrap();
            app.tokens.set_token(&token).await.unwrap();
        }
        assert!(tmp.path().join("session.json").exists());

        let app = App::open(Config::default(), tmp.path()).unwrap();
        assert_eq!(app.tokens.token().await.unwrap(), Some(token));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.pagination.page_size = 0;
        assert!(App::new(config, Arc::new(MemoryStorage::new())).is_err());
    }

    #[cfg(feature = "keycloak")]
    #[tokio::test]
    async fn test_keycloak_provider_selects_broker_session() {
        let mut config = Config::default();
        config.auth.provider = AuthProvider::Keycloak;
        let app = App::new(config, Arc::new(MemoryStorage::new())).unwrap();
        assert!(!app.uses_local_login());
        assert!(!app.session.is_authenticated().await.unwrap());
    }
}
