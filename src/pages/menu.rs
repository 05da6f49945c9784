// src/pages/menu.rs

//! Navigation bar: who is connected, and logout.

use std::sync::Arc;

use crate::auth::Session;
use crate::error::Result;

pub struct MenuPage {
    session: Arc<dyn Session>,
    pub user_name: Option<String>,
}

impl MenuPage {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            session,
            user_name: None,
        }
    }

    /// Read the user's name from the current session.
    pub async fn init(&mut self) -> Result<()> {
        self.user_name = self.session.display_name().await?;
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.session.logout().await?;
        self.user_name = None;
        log::info!("Logged out");
        Ok(())
    }

    pub fn render(&self) -> String {
        let name = self.user_name.as_deref().unwrap_or("anonymous");
        format!(
            "Welcome {name}\n  books        catalog\n  books mine   my books\n  books borrowed / returned\n  articles, themes\n  logout\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::auth::jwt::test_tokens::token_expiring_in;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_init_reads_name_then_logout_clears_it() {
        let store = Arc::new(MemoryStorage::new());
        let tokens = Arc::new(TokenService::new(store.clone()));
        tokens.set_token(&token_expiring_in(3600)).await.unwrap();

        let mut menu = MenuPage::new(tokens.clone());
        menu.init().await.unwrap();
        assert!(menu.user_name.as_deref().unwrap().contains("Ada"));
        assert!(menu.render().starts_with("Welcome Ada"));

        menu.logout().await.unwrap();
        assert!(menu.user_name.is_none());
        assert!(tokens.token().await.unwrap().is_none());
    }
}
