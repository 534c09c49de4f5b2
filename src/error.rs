use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarStateError {
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Token rejected: {0}")]
    Unauthorized(String),

    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid repository name: {0}")]
    InvalidRepoName(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StarStateError {
    /// Credential missing or malformed, unauthenticated session, or token
    /// rejected while authenticating.
    pub fn is_auth(&self) -> bool {
        matches!(self, StarStateError::AuthError(_))
    }

    /// Any failure talking to the remote service other than authentication.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            StarStateError::ApiError(_)
                | StarStateError::Unauthorized(_)
                | StarStateError::RateLimitExceeded(_)
                | StarStateError::NotFound(_)
                | StarStateError::NetworkError(_)
                | StarStateError::JsonError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StarStateError>;
