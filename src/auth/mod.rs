// src/auth/mod.rs

//! Token handling, the auth guard, and identity broker login.

pub mod guard;
pub mod jwt;
#[cfg(feature = "keycloak")]
pub mod keycloak;
pub mod session;
pub mod token;

pub use guard::{authorize, can_activate};
pub use jwt::{TokenClaims, decode_claims};
#[cfg(feature = "keycloak")]
pub use keycloak::{KeycloakService, TokenSet};
pub use session::Session;
pub use token::TokenService;
