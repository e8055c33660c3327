use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dojo_core::UserId;

use crate::Role;

/// Default access-token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token.
///
/// The role claim is a snapshot at issue time; request handling re-reads the
/// user record, so a stale role in the token never widens access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiration (unix seconds).
    pub exp: i64,
}

impl TokenClaims {
    /// Claims for a fresh token valid for `ttl_hours` from now.
    pub fn new(user_id: UserId, username: impl Into<String>, role: Role, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(ttl_hours);
        Self {
            user_id,
            username: username.into(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, malformed token, or expired.
    #[error("invalid or expired token")]
    Invalid,

    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Sign claims into a compact HS256 token.
pub fn issue_token(secret: &[u8], claims: &TokenClaims) -> Result<String, TokenError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_token(secret: &[u8], token: &str) -> Result<TokenClaims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
}
