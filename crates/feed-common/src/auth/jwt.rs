//! HS256 bearer tokens
//!
//! Sessions are issued by the identity provider that shares `JWT_SECRET`.
//! The feed only verifies them: signature, expiry, token type, and a
//! numeric `sub` holding the user id.

use chrono::{Duration, Utc};
use feed_core::UserId;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    fn access(user_id: UserId, lifetime_secs: i64) -> Self {
        let issued = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: issued.timestamp(),
            exp: (issued + Duration::seconds(lifetime_secs)).timestamp(),
            token_type: TokenType::Access,
        }
    }

    /// User id from `sub`; anything but a positive integer is an invalid token
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

#[derive(Clone)]
pub struct JwtService {
    keys: (EncodingKey, DecodingKey),
    validation: Validation,
    lifetime_secs: i64,
}

impl JwtService {
    /// `lifetime_secs` applies to tokens minted by [`JwtService::issue_access_token`]
    #[must_use]
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        let secret = secret.as_bytes();
        Self {
            keys: (
                EncodingKey::from_secret(secret),
                DecodingKey::from_secret(secret),
            ),
            validation: Validation::new(Algorithm::HS256),
            lifetime_secs,
        }
    }

    /// Mint an access token; tests and local tooling only
    pub fn issue_access_token(&self, user_id: UserId) -> Result<String, AppError> {
        let claims = Claims::access(user_id, self.lifetime_secs);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.keys.0)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("JWT encoding failed")))
    }

    /// Check signature and expiry, returning the claims as sent
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.keys.1, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Verify an access token and resolve the caller
    pub fn authenticate(&self, token: &str) -> Result<UserId, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::InvalidToken);
        }
        claims.user_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}
