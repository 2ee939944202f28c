// src/application/error.rs
use crate::domain::{article::AttachmentCodecError, errors::DomainError};
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Attachment(#[from] AttachmentCodecError),

    #[error("search index sync failed: {0}")]
    SearchIndexSync(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    NotFound,
    PermissionDenied,
    InvalidState,
    Conflict,
    EncodeDecodeFailure,
    DependencyFailure,
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn search_index_sync(msg: impl Into<String>) -> Self {
        Self::SearchIndexSync(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Unauthorized(_) => ErrorKind::Unauthenticated,
            Self::Forbidden(_) => ErrorKind::PermissionDenied,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Attachment(_) => ErrorKind::EncodeDecodeFailure,
            Self::SearchIndexSync(_) | Self::Infrastructure(_) => ErrorKind::DependencyFailure,
            Self::Domain(err) => match err {
                DomainError::Validation(_) => ErrorKind::Validation,
                DomainError::Conflict(_) => ErrorKind::Conflict,
                DomainError::NotFound(_) => ErrorKind::NotFound,
                DomainError::Persistence(_) | DomainError::SearchIndex(_) => {
                    ErrorKind::DependencyFailure
                }
            },
        }
    }
}
