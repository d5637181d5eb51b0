//! Page-level workflows tying the forms, the gateway and the entity stores
//! together.

use thiserror::Error;

use crate::forms::{FieldErrors, FormError};
use crate::repository::errors::RepositoryError;

pub mod activities;
pub mod auth;
pub mod companies;
pub mod contacts;
pub mod dashboard;
pub mod deals;
pub mod records;
pub mod tasks;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Form input failed validation; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("invalid form input: {0}")]
    Form(String),

    #[error("record not found")]
    NotFound,

    #[error("not signed in")]
    Unauthorized,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => ServiceError::Validation(FieldErrors::from(errors)),
            FormError::InvalidDate(value) => ServiceError::Form(format!("invalid date: {value}")),
        }
    }
}

impl ServiceError {
    /// Short message for a toast notification.
    pub fn notice(&self) -> String {
        match self {
            ServiceError::Validation(_) => "Please fill in all required fields".to_string(),
            ServiceError::Form(message) | ServiceError::TypeConstraint(message) => message.clone(),
            ServiceError::NotFound | ServiceError::Repository(RepositoryError::NotFound) => {
                "The record no longer exists".to_string()
            }
            ServiceError::Unauthorized
            | ServiceError::Repository(RepositoryError::Unauthorized) => {
                "Your session has expired, please sign in again".to_string()
            }
            ServiceError::Repository(err) => format!("Something went wrong: {err}"),
        }
    }

    /// Per-field messages when the failure was a validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
