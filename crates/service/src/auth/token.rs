//! Bearer token issuance (HS256 JWT). Verification happens at whatever
//! boundary consumes the token, not here.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthError;

pub const DEFAULT_TOKEN_TTL_SECS: u64 = 15 * 60;
pub const DEFAULT_TOKEN_PARTY: &str = "cp-api";

pub trait TokenSigner: Send + Sync {
    fn sign(&self, user_id: Uuid, email: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError>;
}

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtSigner {
    key: Option<EncodingKey>,
    ttl: Duration,
    issuer: String,
    audience: String,
}

impl JwtSigner {
    /// A zero `ttl_secs` falls back to 15 minutes. An empty secret builds a
    /// signer whose every `sign` call fails.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let ttl_secs = if ttl_secs == 0 { DEFAULT_TOKEN_TTL_SECS } else { ttl_secs };
        let key = (!secret.is_empty()).then(|| EncodingKey::from_secret(secret.as_bytes()));
        Self {
            key,
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000)),
            issuer: DEFAULT_TOKEN_PARTY.into(),
            audience: DEFAULT_TOKEN_PARTY.into(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fails when `issued_at + ttl` falls outside the representable range.
    pub fn claims(&self, user_id: Uuid, email: &str, issued_at: DateTime<Utc>) -> Result<AccessClaims, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenError("token expiry out of range".into()))?;
        Ok(AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, user_id: Uuid, email: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| AuthError::TokenError("signing key unavailable".into()))?;
        let claims = self.claims(user_id, email, issued_at)?;
        encode(&Header::new(Algorithm::HS256), &claims, key).map_err(|e| AuthError::TokenError(e.to_string()))
    }
}
