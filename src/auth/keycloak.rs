// src/auth/keycloak.rs

//! External identity broker (Keycloak) integration.
//!
//! Covers what a browser adapter would do for this client: build the login
//! redirect, obtain and refresh tokens, end the session, and point at the
//! account management page. Tokens are kept in the same key/value store as
//! the local token, under their own keys.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::jwt;
use crate::auth::session::Session;
use crate::error::{AppError, Result};
use crate::models::{KeycloakConfig, UserProfile};
use crate::services::api::check_status;
use crate::storage::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "kc_token";
pub const REFRESH_TOKEN_KEY: &str = "kc_refresh_token";
pub const ID_TOKEN_KEY: &str = "kc_id_token";

/// Token endpoint answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_expires_in: Option<i64>,
    pub token_type: Option<String>,
}

/// OpenID Connect client for the broker realm.
pub struct KeycloakService {
    client: Client,
    config: KeycloakConfig,
    store: Arc<dyn KeyValueStore>,
}

impl KeycloakService {
    pub fn new(client: Client, config: KeycloakConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client,
            config,
            store,
        }
    }

    pub fn config(&self) -> &KeycloakConfig {
        &self.config
    }

    /// `{url}/realms/{realm}/`
    fn realm_url(&self) -> Result<Url> {
        let base = format!(
            "{}/realms/{}/",
            self.config.url.trim_end_matches('/'),
            self.config.realm
        );
        Ok(Url::parse(&base)?)
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self
            .realm_url()?
            .join(&format!("protocol/openid-connect/{name}"))?)
    }

    /// URL a browser opens to log in.
    pub fn login_url(&self, redirect_uri: Option<&str>) -> Result<Url> {
        let mut url = self.endpoint("auth")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair(
                "redirect_uri",
                redirect_uri.unwrap_or(&self.config.redirect_uri),
            )
            .append_pair("response_type", "code")
            .append_pair("scope", "openid");
        Ok(url)
    }

    /// Account management page.
    pub fn account_url(&self) -> Result<Url> {
        let mut url = self.realm_url()?.join("account")?;
        url.query_pairs_mut()
            .append_pair("referrer", &self.config.client_id)
            .append_pair("referrer_uri", &self.config.redirect_uri);
        Ok(url)
    }

    /// Obtain tokens with the user's credentials and store them.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenSet> {
        log::info!("Authenticating {} against realm {}", username, self.config.realm);
        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", username),
            ("password", password),
            ("scope", "openid"),
        ];
        let tokens = self.request_tokens(&form).await?;
        self.store_tokens(&tokens).await?;
        Ok(tokens)
    }

    /// Exchange the refresh token for a new token set.
    pub async fn refresh(&self) -> Result<TokenSet> {
        let refresh_token = self
            .store
            .get_item(REFRESH_TOKEN_KEY)
            .await?
            .ok_or_else(|| AppError::unauthenticated("no refresh token stored"))?;

        log::debug!("Refreshing access token");
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token.as_str()),
        ];
        let tokens = self.request_tokens(&form).await?;
        self.store_tokens(&tokens).await?;
        Ok(tokens)
    }

    async fn request_tokens(&self, form: &[(&str, &str)]) -> Result<TokenSet> {
        let response = self
            .client
            .post(self.endpoint("token")?)
            .form(form)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn store_tokens(&self, tokens: &TokenSet) -> Result<()> {
        self.store
            .set_item(ACCESS_TOKEN_KEY, &tokens.access_token)
            .await?;
        if let Some(refresh) = &tokens.refresh_token {
            self.store.set_item(REFRESH_TOKEN_KEY, refresh).await?;
        }
        if let Some(id_token) = &tokens.id_token {
            self.store.set_item(ID_TOKEN_KEY, id_token).await?;
        }
        Ok(())
    }

    /// Stored access token, without checking it.
    pub async fn token(&self) -> Result<Option<String>> {
        self.store.get_item(ACCESS_TOKEN_KEY).await
    }

    /// Refresh the access token when it expires within `min_validity_secs`.
    ///
    /// Returns whether a refresh happened.
    pub async fn update_token(&self, min_validity_secs: i64) -> Result<bool> {
        let token = self
            .token()
            .await?
            .ok_or_else(|| AppError::unauthenticated("not logged in to the identity broker"))?;

        let claims = jwt::decode_claims(&token)?;
        if !claims.is_expired_at(Utc::now(), min_validity_secs) {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    /// End the broker session and forget all tokens.
    ///
    /// Local tokens are removed even when the broker can't be reached.
    pub async fn logout(&self) -> Result<()> {
        if let Some(refresh_token) = self.store.get_item(REFRESH_TOKEN_KEY).await? {
            let form = [
                ("client_id", self.config.client_id.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ];
            let outcome = match self
                .client
                .post(self.endpoint("logout")?)
                .form(&form)
                .send()
                .await
            {
                Ok(response) => check_status(response).await.map(|_| ()),
                Err(e) => Err(AppError::Http(e)),
            };
            if let Err(e) = outcome {
                log::warn!("Identity broker logout failed: {}", e);
            }
        }

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ID_TOKEN_KEY] {
            self.store.remove_item(key).await?;
        }
        Ok(())
    }

    /// Profile of the logged-in user.
    pub async fn load_user_profile(&self) -> Result<UserProfile> {
        let token = self
            .bearer_token()
            .await?
            .ok_or_else(|| AppError::unauthenticated("not logged in to the identity broker"))?;

        let response = self
            .client
            .get(self.realm_url()?.join("account")?)
            .bearer_auth(&token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let mut profile: UserProfile = check_status(response).await?.json().await?;
        profile.token = Some(token);
        Ok(profile)
    }

    /// Check the stored session and load the profile when authenticated.
    pub async fn init(&self) -> Result<Option<UserProfile>> {
        log::debug!("Authenticating the user...");
        if !self.is_authenticated().await? {
            log::warn!("User not authenticated");
            return Ok(None);
        }
        Ok(Some(self.load_user_profile().await?))
    }
}

#[async_trait]
impl Session for KeycloakService {
    async fn bearer_token(&self) -> Result<Option<String>> {
        if self.token().await?.is_none() {
            return Ok(None);
        }
        if let Err(e) = self.update_token(self.config.min_validity_secs).await {
            log::warn!("Token refresh failed: {}", e);
        }
        self.token().await
    }

    async fn is_authenticated(&self) -> Result<bool> {
        let Some(token) = self.token().await? else {
            return Ok(false);
        };
        let still_valid = jwt::decode_claims(&token)
            .map(|claims| !claims.is_expired(0))
            .unwrap_or(false);
        if still_valid {
            return Ok(true);
        }
        match self.refresh().await {
            Ok(_) => Ok(true),
            Err(e) => {
                log::info!("Broker session expired: {}", e);
                Ok(false)
            }
        }
    }

    async fn display_name(&self) -> Result<Option<String>> {
        Ok(self
            .token()
            .await?
            .and_then(|t| jwt::decode_claims(&t).ok())
            .and_then(|c| c.display_name()))
    }

    async fn logout(&self) -> Result<()> {
        KeycloakService::logout(self).await
    }
}
