// src/auth/jwt.rs

//! JWT payload decoding and expiry checks.
//!
//! The client never holds the signing key, so the payload is read without
//! verifying the signature. Only the server decides whether a token is
//! authentic; the client just needs to know when to stop sending it.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Claims the client cares about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenClaims {
    /// Subject, the user's email for the local backend
    pub sub: Option<String>,

    /// Expiry, seconds since the epoch
    pub exp: Option<i64>,

    /// Issued at, seconds since the epoch
    pub iat: Option<i64>,

    /// User object the local backend embeds in the token
    #[serde(rename = "fullName")]
    pub full_name: Option<Value>,

    /// Identity broker claims
    pub given_name: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,

    /// Granted roles
    pub authorities: Vec<String>,
}

impl TokenClaims {
    /// Expiry as a timestamp, `None` for tokens that never expire.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Whether the token is expired at `now`.
    ///
    /// `leeway_secs` moves the deadline earlier, so a token about to expire
    /// already counts as expired. A token without `exp` never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_secs: i64) -> bool {
        match self.exp {
            Some(exp) => exp <= now.timestamp().saturating_add(leeway_secs),
            None => false,
        }
    }

    pub fn is_expired(&self, leeway_secs: i64) -> bool {
        self.is_expired_at(Utc::now(), leeway_secs)
    }

    /// Seconds left before expiry, negative once expired.
    pub fn seconds_left_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.exp.map(|exp| exp - now.timestamp())
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> Option<String> {
        let from_full_name = match &self.full_name {
            Some(Value::Object(user)) => user
                .get("firstname")
                .or_else(|| user.get("firstName"))
                .and_then(Value::as_str)
                .map(str::to_string),
            Some(Value::String(name)) => Some(name.clone()),
            _ => None,
        };

        from_full_name
            .or_else(|| self.given_name.clone())
            .or_else(|| self.preferred_username.clone())
            .or_else(|| self.sub.clone())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Decode a token's claims without checking its signature or expiry.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Shorten a token for log output.
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{prefix}…({} chars)", token.chars().count())
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::{Value, json};

    /// Sign arbitrary claims with a throwaway key.
    pub fn token_with(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"not-the-server-key"),
        )
        .unwrap()
    }

    /// Token expiring `offset_secs` from now (negative = already expired).
    pub fn token_expiring_in(offset_secs: i64) -> String {
        let exp = chrono::Utc::now().timestamp() + offset_secs;
        token_with(json!({
            "sub": "reader@example.com",
            "exp": exp,
            "fullName": {"firstname": "Ada", "lastname": "Lovelace"},
            "authorities": ["USER"]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_reads_local_backend_claims() {
        let claims = decode_claims(&token_expiring_in(3600)).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("reader@example.com"));
        assert_eq!(claims.display_name().as_deref(), Some("Ada"));
        assert_eq!(claims.authorities, vec!["USER".to_string()]);
        assert!(!claims.is_expired(0));
    }

    #[test]
    fn test_expired_token() {
        let claims = decode_claims(&token_expiring_in(-10)).unwrap();
        assert!(claims.is_expired(0));
    }

    #[test]
    fn test_leeway_expires_early() {
        let claims = decode_claims(&token_expiring_in(20)).unwrap();
        assert!(!claims.is_expired(0));
        assert!(claims.is_expired(60));
    }

    #[test]
    fn test_token_without_exp_never_expires() {
        let claims = decode_claims(&token_with(json!({"sub": "x"}))).unwrap();
        assert!(claims.expires_at().is_none());
        assert!(!claims.is_expired(0));
    }

    #[test]
    fn test_broker_claims_display_name() {
        let token = token_with(json!({
            "exp": 4_102_444_800_i64,
            "aud": "account",
            "preferred_username": "ada",
            "given_name": "Ada"
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.display_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let claims = TokenClaims {
            exp: Some(1_000),
            ..TokenClaims::default()
        };
        let at = |secs| Utc.timestamp_opt(secs, 0).single().unwrap();
        assert!(!claims.is_expired_at(at(999), 0));
        assert!(claims.is_expired_at(at(1_000), 0));
        assert_eq!(claims.seconds_left_at(at(400)), Some(600));
    }

    #[test]
    fn test_malformed_token_is_an_error() {
        assert!(decode_claims("definitely.not.ajwt").is_err());
        assert!(decode_claims("").is_err());
    }

    #[test]
    fn test_redact_keeps_prefix_only() {
        let redacted = redact("abcdefghijklmnop");
        assert!(redacted.starts_with("abcdefgh"));
        assert!(!redacted.contains("ijkl"));
    }
}
