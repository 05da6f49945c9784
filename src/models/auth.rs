// src/models/auth.rs

//! Authentication and registration payloads.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum password length accepted by the server.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

fn check_email(email: &str, errors: &mut Vec<String>) {
    if email.trim().is_empty() {
        errors.push("Email is mandatory".to_string());
    } else if !is_email(email.trim()) {
        errors.push("Email is not formatted".to_string());
    }
}

fn check_password(password: &str, errors: &mut Vec<String>) {
    if password.trim().is_empty() {
        errors.push("Password is mandatory".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "Password should be {MIN_PASSWORD_LENGTH} characters minimum"
        ));
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationRequest {
    pub email: String,
    pub password: String,
}

impl AuthenticationRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors
    }
}

/// Successful login answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticationResponse {
    pub token: Option<String>,
}

/// Sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.firstname.trim().is_empty() {
            errors.push("Firstname is mandatory".to_string());
        }
        if self.lastname.trim().is_empty() {
            errors.push("Lastname is mandatory".to_string());
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_request_valid() {
        let request = AuthenticationRequest::new("reader@example.com", "correct-horse");
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_authentication_request_reports_bad_email_and_short_password() {
        let request = AuthenticationRequest::new("not-an-email", "short");
        let errors = request.validate();
        assert_eq!(
            errors,
            vec![
                "Email is not formatted".to_string(),
                "Password should be 8 characters minimum".to_string(),
            ]
        );
    }

    #[test]
    fn test_registration_requires_names() {
        let request = RegistrationRequest {
            email: "reader@example.com".to_string(),
            password: "long-enough".to_string(),
            ..RegistrationRequest::default()
        };
        assert_eq!(request.validate().len(), 2);
    }

    #[test]
    fn test_authentication_response_without_token() {
        let response: AuthenticationResponse = serde_json::from_str("{}").unwrap();
        assert!(response.token.is_none());
    }
}
