//! Bearer-token mint and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Token TTL in seconds (one hour).
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in a bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user's id.
    pub sub: String,
    /// Issued-at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

/// Mint a signed bearer token for a user.
pub fn mint_token(secret: &str, user_id: i64) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(?e, "failed to sign bearer token");
        ApiError::internal("Token signing failed")
    })
}

/// Verify a bearer token and return the subject user id.
pub fn verify_token(secret: &str, token: &str) -> Result<i64, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    data.claims.sub.parse().map_err(|_| TokenError::Invalid)
}
