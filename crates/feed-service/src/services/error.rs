//! Errors raised by the use-case layer

use feed_common::AppError;
use feed_core::DomainError;
use std::fmt::Display;
use thiserror::Error;

/// Failure of a service call
///
/// Domain and application errors pass through untouched so the API layer
/// can still read their own codes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(inner) => AppError::domain_status(inner),
            Self::App(inner) => inner.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    /// Machine-readable code placed in the error envelope
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(inner) => inner.code(),
            Self::App(inner) => inner.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}
