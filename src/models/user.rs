// src/models/user.rs

//! Profile of the connected user, as the identity broker reports it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_verified: Option<bool>,
    /// Access token the profile was loaded with
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl UserProfile {
    /// Name shown in the menu.
    pub fn display_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .filter(|n| !n.is_empty())
    }
}
