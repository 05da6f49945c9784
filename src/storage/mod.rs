//! Persistent key/value storage for session data.
//!
//! Plays the role browser local storage plays for a web client: a flat
//! string map that survives between runs.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Client configuration
//! └── session.json          # Key/value store (token, broker tokens)
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for key/value storage backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never set.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a single key. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove every key.
    async fn clear(&self) -> Result<()>;
}
