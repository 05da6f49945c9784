// src/models/mod.rs

//! Domain models for the client.
//!
//! Payloads mirror the backend's JSON shapes; configuration lives here too.

mod article;
mod auth;
mod book;
mod config;
mod error_response;
mod feedback;
mod page;
mod user;

// Re-export all public types
pub use article::{Article, Theme, ThemeRequest};
pub use auth::{
    AuthenticationRequest, AuthenticationResponse, MIN_PASSWORD_LENGTH, RegistrationRequest,
};
pub use book::{BookRequest, BookResponse, BorrowedBookResponse};
pub use config::{
    API_URL_ENV, ApiConfig, AuthConfig, AuthProvider, Config, HttpConfig, KeycloakConfig,
    PaginationConfig,
};
pub use error_response::ErrorResponse;
pub use feedback::{FeedbackRequest, FeedbackResponse, MAX_NOTE};
pub use page::PageResponse;
pub use user::UserProfile;
