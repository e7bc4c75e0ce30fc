//! # Application Error Types
//!
//! One error type for every service operation. Domain errors from
//! `pareidolia-state`, `pareidolia-core` and the persistence port are mapped
//! here. A host turns an [`AppError`] into its transport's error shape via
//! [`AppError::to_body()`], which never exposes internal details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pareidolia_core::ValidationError;
use pareidolia_state::EventStateError;

use crate::persistence::PersistenceError;

/// Serializable error body handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable message. Generic for internal errors.
    pub message: String,
}

/// Service-level error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The resource does not exist or is not visible to the caller.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller's role does not permit the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Submitted fields failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation conflicts with the resource's current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage failure or corrupt data. Logged, never shown to callers.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// Build the outgoing error body, logging internal errors.
    pub fn to_body(&self) -> ErrorBody {
        if let Self::Internal(_) = self {
            tracing::error!(error = %self, "internal error");
        }
        ErrorBody {
            code: self.code().to_string(),
            message: self.public_message(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<EventStateError> for AppError {
    fn from(err: EventStateError) -> Self {
        match &err {
            EventStateError::InvalidTransition { .. }
            | EventStateError::NotEditable { .. }
            | EventStateError::MessagingClosed { .. } => Self::Conflict(err.to_string()),
            EventStateError::UnknownState(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        match &err {
            PersistenceError::NotFound { .. } => Self::NotFound(err.to_string()),
            PersistenceError::Conflict(_) => Self::Conflict(err.to_string()),
            PersistenceError::Decode(_) | PersistenceError::Backend(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
