use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RepositoryError::Decode(err.to_string());
        }

        match err.status() {
            Some(status) if status == reqwest::StatusCode::NOT_FOUND => RepositoryError::NotFound,
            Some(status) if status == reqwest::StatusCode::UNAUTHORIZED => {
                RepositoryError::Unauthorized
            }
            Some(status) => RepositoryError::Backend {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => RepositoryError::Transport(err.to_string()),
        }
    }
}
