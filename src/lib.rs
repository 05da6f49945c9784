// src/lib.rs

//! Booknet client library
//!
//! Talks to the book social network backend: account flows, the book
//! catalog and borrow/return workflow, feedback, and articles.

pub mod app;
pub mod auth;
pub mod error;
pub mod models;
pub mod pages;
pub mod services;
pub mod storage;
pub mod utils;

pub use app::App;
