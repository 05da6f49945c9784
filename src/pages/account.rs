// src/pages/account.rs

//! Sign-up and account activation views.

use std::sync::Arc;

use crate::error::Result;
use crate::models::RegistrationRequest;
use crate::pages::{is_displayable, render_errors};
use crate::services::AuthenticationService;

pub struct RegisterPage {
    auth: Arc<AuthenticationService>,
    pub register_request: RegistrationRequest,
    pub error_msg: Vec<String>,
    pub registered: bool,
}

impl RegisterPage {
    pub fn new(auth: Arc<AuthenticationService>) -> Self {
        Self {
            auth,
            register_request: RegistrationRequest::default(),
            error_msg: Vec::new(),
            registered: false,
        }
    }

    /// Submit the form. Returns whether the account was created.
    pub async fn register(&mut self) -> Result<bool> {
        self.error_msg.clear();
        self.registered = false;

        let local_errors = self.register_request.validate();
        if !local_errors.is_empty() {
            self.error_msg = local_errors;
            return Ok(false);
        }

        match self.auth.register(&self.register_request).await {
            Ok(()) => {
                self.registered = true;
                Ok(true)
            }
            Err(e) if is_displayable(&e) => {
                self.error_msg = e.messages();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.registered {
            out.push_str(&format!(
                "Account created for {}. Check your inbox for the activation code, then run `booknet activate <code>`.\n",
                self.register_request.email
            ));
        } else {
            out.push_str("Registration failed:\n");
            render_errors(&mut out, &self.error_msg);
        }
        out
    }
}

pub struct ActivateAccountPage {
    auth: Arc<AuthenticationService>,
    pub message: String,
    pub is_okay: bool,
    pub submitted: bool,
}

impl ActivateAccountPage {
    pub fn new(auth: Arc<AuthenticationService>) -> Self {
        Self {
            auth,
            message: String::new(),
            is_okay: true,
            submitted: false,
        }
    }

    /// Send the activation code received by email.
    pub async fn confirm_account(&mut self, code: &str) -> Result<()> {
        let code = code.trim();
        match self.auth.confirm(code).await {
            Ok(()) => {
                self.message =
                    "Your account has been successfully activated.\nNow you can proceed to login"
                        .to_string();
                self.is_okay = true;
            }
            Err(e) if is_displayable(&e) => {
                log::debug!("Activation failed: {}", e);
                self.message = "Token has been expired or invalid".to_string();
                self.is_okay = false;
            }
            Err(e) => return Err(e),
        }
        self.submitted = true;
        Ok(())
    }

    pub fn render(&self) -> String {
        if !self.submitted {
            return "Enter the activation code sent to your email.\n".to_string();
        }
        let mark = if self.is_okay { "✓" } else { "✗" };
        format!("{mark} {}\n", self.message)
    }
}
