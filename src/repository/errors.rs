use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Note not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Notes API responded with {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Classifies a non-success response of the notes API.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = body.trim();
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("no details").to_string()
        } else {
            message.to_string()
        };

        match status {
            StatusCode::NOT_FOUND => RepositoryError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                RepositoryError::ValidationError(message)
            }
            _ => RepositoryError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Unexpected(format!("Malformed response: {err}"))
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::from_status(status, &err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_classified() {
        assert!(matches!(
            RepositoryError::from_status(StatusCode::NOT_FOUND, ""),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::BAD_REQUEST, "title is too short"),
            RepositoryError::ValidationError(message) if message == "title is too short"
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::SERVICE_UNAVAILABLE, " "),
            RepositoryError::Api { status: 503, message } if message == "Service Unavailable"
        ));
    }
}
