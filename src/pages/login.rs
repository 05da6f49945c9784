// src/pages/login.rs

//! Login view.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::error::Result;
use crate::models::AuthenticationRequest;
use crate::pages::{is_displayable, render_errors};
use crate::services::AuthenticationService;

pub struct LoginPage {
    auth: Arc<AuthenticationService>,
    tokens: Arc<TokenService>,
    pub auth_request: AuthenticationRequest,
    pub error_msg: Vec<String>,
}

impl LoginPage {
    pub fn new(auth: Arc<AuthenticationService>, tokens: Arc<TokenService>) -> Self {
        Self {
            auth,
            tokens,
            auth_request: AuthenticationRequest::default(),
            error_msg: Vec::new(),
        }
    }

    /// Submit the form. Returns `true` once a token has been stored.
    ///
    /// Rejections from the server land in `error_msg`; transport failures
    /// are returned as errors.
    pub async fn login(&mut self) -> Result<bool> {
        self.error_msg.clear();

        let local_errors = self.auth_request.validate();
        if !local_errors.is_empty() {
            self.error_msg = local_errors;
            return Ok(false);
        }

        match self.auth.authenticate(&self.auth_request).await {
            Ok(response) => match response.token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    self.tokens.set_token(&token).await?;
                    log::info!("Logged in as {}", self.auth_request.email);
                    Ok(true)
                }
                None => {
                    log::warn!("Token not found in authentication response");
                    self.error_msg.push("Token not found".to_string());
                    Ok(false)
                }
            },
            Err(e) if is_displayable(&e) => {
                log::debug!("Authentication error: {}", e);
                self.error_msg = e.messages();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.error_msg.is_empty() {
            out.push_str("Login successful\n");
        } else {
            out.push_str("Login failed:\n");
            render_errors(&mut out, &self.error_msg);
        }
        out
    }
}
