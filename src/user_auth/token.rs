//! Bearer token issuance and verification (HS256 JWT).
//!
//! Verification is a pure function of `(token, secret, now)`: the `*_at`
//! variants take the clock explicitly, the plain variants use `Utc::now()`.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default lifetime of an interactive session token.
pub const SESSION_TTL_DAYS: i64 = 30;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id as string)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds). Absent on service tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSignature)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    /// Signature mismatch or a token that cannot be decoded at all.
    #[error("token signature is invalid or token is malformed")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, session_ttl: Duration) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl,
        })
    }

    pub fn with_default_ttl(secret: &str) -> Result<Self, TokenError> {
        Self::new(secret, Duration::days(SESSION_TTL_DAYS))
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Issue an expiring token for an interactive session.
    pub fn issue_session_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_session_token_at(user_id, Utc::now().timestamp())
    }

    pub fn issue_session_token_at(&self, user_id: i64, now: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: Some(now + self.session_ttl.num_seconds()),
        };
        self.sign(&claims)
    }

    /// Issue a token without an expiry claim.
    pub fn issue_service_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_service_token_at(user_id, Utc::now().timestamp())
    }

    pub fn issue_service_token_at(&self, user_id: i64, now: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: None,
        };
        self.sign(&claims)
    }

    /// Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_token_at(token, Utc::now().timestamp())
    }

    pub fn verify_token_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        // Expiry is checked below against the caller's clock, without leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::InvalidSignature)?
            .claims;

        // A subject that is not a user id is treated like any other malformed token.
        claims.user_id()?;

        match claims.exp {
            Some(exp) if now > exp => Err(TokenError::Expired),
            _ => Ok(claims),
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn service() -> TokenService {
        TokenService::with_default_ttl(SECRET).unwrap()
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(
            TokenService::with_default_ttl("").unwrap_err(),
            TokenError::EmptySecret
        );
        assert_eq!(
            TokenService::with_default_ttl("   ").unwrap_err(),
            TokenError::EmptySecret
        );
    }

    #[test]
    fn test_session_token_carries_subject_and_expiry() {
        let svc = service();
        let now = 1_700_000_000;
        let token = svc.issue_session_token_at(42, now).unwrap();
        let claims = svc.verify_token_at(&token, now + 10).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.iat, now);
        assert_eq!(claims.exp, Some(now + 30 * 24 * 3600));
    }

    #[test]
    fn test_session_token_expires_after_ttl() {
        let svc = service();
        let now = 1_700_000_000;
        let token = svc.issue_session_token_at(7, now).unwrap();
        let exp = now + 30 * 24 * 3600;

        assert!(svc.verify_token_at(&token, exp).is_ok());
        assert_eq!(
            svc.verify_token_at(&token, exp + 1).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_service_token_never_expires() {
        let svc = service();
        let token = svc.issue_service_token_at(9, 0).unwrap();
        let claims = svc.verify_token_at(&token, i64::MAX).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(claims.user_id().unwrap(), 9);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let svc = service();
        let token = svc.issue_session_token_at(1, 1_700_000_000).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        // Swap in the payload of a token for another user, keeping the original signature.
        let other = svc.issue_session_token_at(2, 1_700_000_000).unwrap();
        let other_payload = other.split('.').nth(1).unwrap();
        let forged = format!("{}.{}.{}", parts[0], other_payload, parts[2]);

        assert_eq!(
            svc.verify_token_at(&forged, 1_700_000_001).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue_service_token_at(1, 0).unwrap();
        let other = TokenService::with_default_ttl("another-secret").unwrap();
        assert_eq!(
            other.verify_token_at(&token, 1).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_garbage_rejected() {
        let svc = service();
        for token in ["", "abc", "a.b.c", "Bearer xyz"] {
            assert_eq!(
                svc.verify_token_at(token, 0).unwrap_err(),
                TokenError::InvalidSignature,
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let svc = service();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: None,
        };
        let token = svc.sign(&claims).unwrap();
        assert_eq!(
            svc.verify_token_at(&token, 1).unwrap_err(),
            TokenError::InvalidSignature
        );
    }
}
