// src/auth/guard.rs

//! Navigation guard for protected commands.

use crate::auth::session::Session;
use crate::error::{AppError, Result};

/// Message shown when a protected command runs without a session.
pub const LOGIN_REQUIRED: &str = "no valid session, run `booknet login` first";

/// Allow the command through, or fail with `Unauthenticated`.
pub async fn authorize(session: &dyn Session) -> Result<()> {
    if session.is_authenticated().await? {
        Ok(())
    } else {
        Err(AppError::unauthenticated(LOGIN_REQUIRED))
    }
}

/// Boolean form of [`authorize`]; storage failures count as "not allowed".
pub async fn can_activate(session: &dyn Session) -> bool {
    match authorize(session).await {
        Ok(()) => true,
        Err(AppError::Unauthenticated(_)) => false,
        Err(e) => {
            log::warn!("Auth guard could not read the session: {}", e);
            false
        }
    }
}
