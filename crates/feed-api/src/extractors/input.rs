//! Request inputs that reject with the API error envelope
//!
//! Axum's own `Json` and `Query` answer 415/422 with a plain-text body.
//! Here every malformed input is a 400 carrying `INVALID_BODY`,
//! `INVALID_QUERY` or `VALIDATION_ERROR`.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// JSON body, deserialized then checked with `Validate`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Query string; a missing or mistyped parameter is a 400
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        let body = match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(rejection) => return Err(ApiError::invalid_body(rejection.body_text())),
        };
        body.validate().map(|()| Self(body)).map_err(ApiError::from)
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, ApiError> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| Self(params))
            .map_err(|rejection| ApiError::invalid_query(rejection.body_text()))
    }
}
