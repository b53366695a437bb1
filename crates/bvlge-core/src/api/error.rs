use reqwest::StatusCode;
use thiserror::Error;

/// Failures returned by `ApiClient`. Callers receive these unchanged: the
/// client never retries, refreshes or logs the user out.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token missing, expired or rejected")]
    Unauthorized { body: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {body}")]
    ServerError { status: StatusCode, body: String },

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized { body },
            403 => ApiError::AccessDenied(body),
            404 => ApiError::NotFound(body),
            500..=599 => ApiError::ServerError { status, body },
            _ => ApiError::Status { status, body },
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::ServerError { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            ApiError::InvalidResponse(_) => None,
        }
    }
}
