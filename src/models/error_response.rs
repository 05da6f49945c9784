// src/models/error_response.rs

//! Error body produced by the backend's exception handler.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorResponse {
    pub business_error_code: Option<i32>,
    pub business_error_description: Option<String>,
    pub error: Option<String>,
    pub validation_errors: Option<Vec<String>>,
}

impl ErrorResponse {
    /// Build from a raw response body.
    ///
    /// Bodies that are not the backend's JSON shape are kept verbatim in
    /// `error`.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Self>(body) {
            Ok(parsed) if !parsed.is_blank() => parsed,
            _ => Self {
                error: Some(body.trim().to_string()).filter(|b| !b.is_empty()),
                ..Self::default()
            },
        }
    }

    fn is_blank(&self) -> bool {
        self.business_error_code.is_none()
            && self.business_error_description.is_none()
            && self.error.is_none()
            && self.validation_errors.is_none()
    }

    /// Messages to show the user: the validation list when there is one,
    /// otherwise the single error.
    pub fn messages(&self) -> Vec<String> {
        match &self.validation_errors {
            Some(errors) if !errors.is_empty() => errors.clone(),
            _ => self
                .error
                .clone()
                .or_else(|| self.business_error_description.clone())
                .into_iter()
                .collect(),
        }
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        let messages = self.messages();
        if messages.is_empty() {
            "no details".to_string()
        } else {
            messages.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_parses_validation_errors() {
        let body = r#"{"validationErrors": ["Email is mandatory", "Password is mandatory"]}"#;
        let parsed = ErrorResponse::from_body(body);
        assert_eq!(parsed.messages().len(), 2);
    }

    #[test]
    fn test_from_body_business_error() {
        let body = r#"{"businessErrorCode": 304, "businessErrorDescription": "Login and / or password is incorrect", "error": "Login and / or password is incorrect"}"#;
        let parsed = ErrorResponse::from_body(body);
        assert_eq!(parsed.business_error_code, Some(304));
        assert_eq!(
            parsed.messages(),
            vec!["Login and / or password is incorrect".to_string()]
        );
    }

    #[test]
    fn test_from_body_keeps_plain_text() {
        let parsed = ErrorResponse::from_body("Bad Gateway\n");
        assert_eq!(parsed.error.as_deref(), Some("Bad Gateway"));
        assert_eq!(parsed.summary(), "Bad Gateway");
    }

    #[test]
    fn test_empty_body_has_no_messages() {
        let parsed = ErrorResponse::from_body("");
        assert!(parsed.messages().is_empty());
        assert_eq!(parsed.summary(), "no details");
    }
}
