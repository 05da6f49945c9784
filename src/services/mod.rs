//! Service layer: one thin wrapper per backend resource.
//!
//! - Account handling (`AuthenticationService`)
//! - Books and the borrow/return workflow (`BookService`)
//! - Reader feedback (`FeedbackService`)
//! - Articles and themes (`ArticleService`)

pub mod api;
mod article;
mod authentication;
mod book;
mod feedback;

pub use api::ApiClient;
pub use article::ArticleService;
pub use authentication::AuthenticationService;
pub use book::{BookService, CoverFile};
pub use feedback::FeedbackService;
