//! Authentication extractor
//!
//! Verifies the `Authorization: Bearer <jwt>` header. The token's `sub`
//! claim is the numeric user id.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use feed_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    fn from_token(state: &AppState, token: &str) -> Result<Self, ApiError> {
        state
            .jwt_service()
            .authenticate(token)
            .map(|user_id| Self { user_id })
            .map_err(|e| {
                tracing::debug!(error = %e, "Bearer token rejected");
                ApiError::InvalidToken
            })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        Self::from_token(&AppState::from_ref(state), bearer.token())
    }
}

/// Caller that may be anonymous
///
/// A missing header yields `None`; a present but invalid token is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.map(|auth| auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let auth = AuthUser::from_token(&AppState::from_ref(state), bearer.token())?;
                Ok(Self(Some(auth)))
            }
            Err(_) => Ok(Self(None)),
        }
    }
}
