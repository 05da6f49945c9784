//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable that overrides `api.root_url`.
pub const API_URL_ENV: &str = "BOOKNET_API_URL";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend REST API location
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Session and token handling
    #[serde(default)]
    pub auth: AuthConfig,

    /// External identity broker settings
    #[serde(default)]
    pub keycloak: KeycloakConfig,

    /// List views
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("Using API root from {}: {}", API_URL_ENV, url);
                self.api.root_url = url;
            }
        }
    }

    /// Serialize to TOML, e.g. to seed a fresh storage directory.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.root_url)
            .map_err(|e| AppError::config(format!("api.root_url is invalid: {e}")))?;
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.auth.storage_file.trim().is_empty() {
            return Err(AppError::config("auth.storage_file is empty"));
        }
        if self.pagination.page_size == 0 {
            return Err(AppError::config("pagination.page_size must be > 0"));
        }
        if self.auth.provider == AuthProvider::Keycloak {
            url::Url::parse(&self.keycloak.url)
                .map_err(|e| AppError::config(format!("keycloak.url is invalid: {e}")))?;
            if self.keycloak.realm.trim().is_empty() {
                return Err(AppError::config("keycloak.realm is empty"));
            }
            if self.keycloak.client_id.trim().is_empty() {
                return Err(AppError::config("keycloak.client_id is empty"));
            }
        }
        Ok(())
    }
}

/// Backend REST API location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    #[serde(default = "defaults::root_url")]
    pub root_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root_url: defaults::root_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Which login flow issues the bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email/password against the backend, JWT kept in local storage
    #[default]
    Local,
    /// External identity broker
    Keycloak,
}

/// Session and token handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub provider: AuthProvider,

    /// Key/value file inside the storage directory
    #[serde(default = "defaults::storage_file")]
    pub storage_file: String,

    /// Seconds before `exp` at which a token already counts as expired
    #[serde(default)]
    pub expiry_leeway_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProvider::default(),
            storage_file: defaults::storage_file(),
            expiry_leeway_secs: 0,
        }
    }
}

/// Identity broker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    #[serde(default = "defaults::keycloak_url")]
    pub url: String,

    #[serde(default = "defaults::realm")]
    pub realm: String,

    #[serde(default = "defaults::client_id")]
    pub client_id: String,

    /// Where the broker sends the browser after login/logout
    #[serde(default = "defaults::redirect_uri")]
    pub redirect_uri: String,

    /// Refresh the access token when it expires within this many seconds
    #[serde(default = "defaults::min_validity")]
    pub min_validity_secs: i64,
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            url: defaults::keycloak_url(),
            realm: defaults::realm(),
            client_id: defaults::client_id(),
            redirect_uri: defaults::redirect_uri(),
            min_validity_secs: defaults::min_validity(),
        }
    }
}

/// List view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn root_url() -> String {
        "http://localhost:9090/api/v1".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "booknet/0.1".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Auth defaults
    pub fn storage_file() -> String {
        "session.json".into()
    }

    // Keycloak defaults
    pub fn keycloak_url() -> String {
        "http://localhost:9999".into()
    }
    pub fn realm() -> String {
        "book-social-network".into()
    }
    pub fn client_id() -> String {
        "bsn".into()
    }
    pub fn redirect_uri() -> String {
        "http://localhost:4200".into()
    }
    pub fn min_validity() -> i64 {
        30
    }

    // Pagination defaults
    pub fn page_size() -> u32 {
        5
    }
}
