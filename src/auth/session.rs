// src/auth/session.rs

//! The seam between login flows and everything that needs a bearer token.

use async_trait::async_trait;

use crate::error::Result;

/// A source of bearer credentials.
///
/// Implemented by the local token holder and by the identity broker client;
/// the HTTP layer and the auth guard only see this trait.
#[async_trait]
pub trait Session: Send + Sync {
    /// Token to attach to outgoing requests, if any.
    async fn bearer_token(&self) -> Result<Option<String>>;

    /// Whether a present, unexpired token is available.
    async fn is_authenticated(&self) -> Result<bool>;

    /// Name of the connected user, for the menu.
    async fn display_name(&self) -> Result<Option<String>>;

    /// Forget the credentials.
    async fn logout(&self) -> Result<()>;
}
