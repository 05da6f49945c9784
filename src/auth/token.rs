// src/auth/token.rs

//! Bearer token holder backed by persistent storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::auth::jwt::{self, TokenClaims};
use crate::auth::session::Session;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key of the token.
pub const TOKEN_KEY: &str = "token";

/// Keeps the JWT issued by the backend's login endpoint.
pub struct TokenService {
    store: Arc<dyn KeyValueStore>,
    cached: Mutex<Option<String>>,
    leeway_secs: i64,
}

impl TokenService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
            leeway_secs: 0,
        }
    }

    /// Count tokens as expired this many seconds early.
    pub fn with_leeway(mut self, leeway_secs: i64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Current token, read from storage on first access.
    pub async fn token(&self) -> Result<Option<String>> {
        let mut cached = self.cached.lock().await;
        if cached.is_none() {
            *cached = self.store.get_item(TOKEN_KEY).await?;
        }
        Ok(cached.clone())
    }

    /// Persist a new token. Blank tokens are ignored.
    pub async fn set_token(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            log::warn!("Token is empty. Not saving to storage.");
            return Ok(());
        }
        log::debug!("Saving token {}", jwt::redact(token));
        self.store.set_item(TOKEN_KEY, token).await?;
        *self.cached.lock().await = Some(token.to_string());
        Ok(())
    }

    /// Remove the token from storage.
    pub async fn clear_token(&self) -> Result<()> {
        log::debug!("Clearing token from storage");
        self.store.remove_item(TOKEN_KEY).await?;
        *self.cached.lock().await = None;
        Ok(())
    }

    /// Decoded claims of the current token.
    pub async fn claims(&self) -> Result<Option<TokenClaims>> {
        match self.token().await? {
            Some(token) => Ok(Some(jwt::decode_claims(&token)?)),
            None => Ok(None),
        }
    }

    /// Whether a usable token is present at `now`.
    ///
    /// An expired or undecodable token wipes the whole store, the same way
    /// a fresh login would start from a clean slate.
    pub async fn is_token_valid_at(&self, now: DateTime<Utc>) -> Result<bool> {
        let Some(token) = self.token().await? else {
            return Ok(false);
        };

        let expired = match jwt::decode_claims(&token) {
            Ok(claims) => claims.is_expired_at(now, self.leeway_secs),
            Err(e) => {
                log::warn!("Stored token could not be decoded: {}", e);
                true
            }
        };

        if expired {
            log::info!("Stored token is no longer valid, clearing storage");
            self.store.clear().await?;
            *self.cached.lock().await = None;
            return Ok(false);
        }
        Ok(true)
    }

    pub async fn is_token_valid(&self) -> Result<bool> {
        self.is_token_valid_at(Utc::now()).await
    }

    pub async fn is_token_not_valid(&self) -> Result<bool> {
        Ok(!self.is_token_valid().await?)
    }
}

#[async_trait]
impl Session for TokenService {
    async fn bearer_token(&self) -> Result<Option<String>> {
        self.token().await
    }

    async fn is_authenticated(&self) -> Result<bool> {
        self.is_token_valid().await
    }

    async fn display_name(&self) -> Result<Option<String>> {
        match self.claims().await {
            Ok(claims) => Ok(claims.and_then(|c| c.display_name())),
            Err(e) => {
                log::warn!("Could not decode token: {}", e);
                Ok(None)
            }
        }
    }

    async fn logout(&self) -> Result<()> {
        self.clear_token().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::test_tokens::token_expiring_in;
    use crate::storage::MemoryStorage;

    fn service() -> (Arc<MemoryStorage>, TokenService) {
        let store = Arc::new(MemoryStorage::new());
        let service = TokenService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_absent_token_is_not_valid() {
        let (_, tokens) = service();
        assert!(tokens.token().await.unwrap().is_none());
        assert!(tokens.is_token_not_valid().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_token_persists_to_store() {
        let (store, tokens) = service();
        let token = token_expiring_in(3600);
        tokens.set_token(&token).await.unwrap();

        assert_eq!(store.get_item(TOKEN_KEY).await.unwrap(), Some(token.clone()));
        assert!(tokens.is_token_valid().await.unwrap());
    }

    #[tokio::test]
    async fn test_token_is_loaded_from_existing_storage() {
        let (store, tokens) = service();
        let token = token_expiring_in(3600);
        store.set_item(TOKEN_KEY, &token).await.unwrap();

        assert_eq!(tokens.token().await.unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_blank_token_is_ignored() {
        let (store, tokens) = service();
        tokens.set_token("  ").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_token_clears_storage() {
        let (store, tokens) = service();
        store.set_item("unrelated", "x").await.unwrap();
        tokens.set_token(&token_expiring_in(-60)).await.unwrap();

        assert!(!tokens.is_token_valid().await.unwrap());
        assert!(store.is_empty().await);
        assert!(tokens.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_token_is_not_valid() {
        let (store, tokens) = service();
        tokens.set_token("garbage").await.unwrap();

        assert!(!tokens.is_token_valid().await.unwrap());
        assert!(store.get_item(TOKEN_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_leeway_applies() {
        let store = Arc::new(MemoryStorage::new());
        let tokens = TokenService::new(store).with_leeway(120);
        tokens.set_token(&token_expiring_in(60)).await.unwrap();

        assert!(!tokens.is_token_valid().await.unwrap());
    }

    #[tokio::test]
    async fn test_session_logout_and_display_name() {
        let (_, tokens) = service();
        tokens.set_token(&token_expiring_in(3600)).await.unwrap();

        assert_eq!(tokens.display_name().await.unwrap().as_deref(), Some("Ada"));
        tokens.logout().await.unwrap();
        assert!(tokens.bearer_token().await.unwrap().is_none());
    }
}
