//! Services orchestrating the notes workflows between routes and the repository.

use thiserror::Error;

use crate::forms::FieldErrors;
use crate::repository::errors::RepositoryError;

pub mod notes;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("note not found")]
    NotFound,

    #[error("invalid form: {0}")]
    Form(FieldErrors),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("notes API rejected the request: {0}")]
    Rejected(String),

    #[error("notes API error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::Rejected(message),
            other => ServiceError::Repository(other),
        }
    }
}
