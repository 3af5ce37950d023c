//! Error handling for the Kstar API client.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Access denied: access token rejected")]
    AccessDenied,

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Response JSON error: {0}")]
    ResponseJsonError(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Station API error: {message}")]
    ApiError { code: Option<i64>, message: String },
    #[error("Station fetch failed after re-authentication: {0}")]
    FetchFailed(#[source] Box<Error>),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable access token could be obtained.
    Auth,
    /// The station request failed for good during this cycle.
    Fetch,
    /// Connectivity, timeout or expired token. Recoverable by re-authenticating.
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AuthFailed(_) => ErrorKind::Auth,
            Error::RequestFailed(e) if Self::is_client_error(e) => ErrorKind::Fetch,
            Error::AccessDenied | Error::RequestFailed(_) | Error::ResponseJsonError(_) => {
                ErrorKind::Transport
            }
            Error::InvalidUrl(_) | Error::ApiError { .. } | Error::FetchFailed(_) => {
                ErrorKind::Fetch
            }
        }
    }

    /// HTTP 4xx other than the token rejections mapped to [`Error::AccessDenied`].
    fn is_client_error(error: &reqwest::Error) -> bool {
        error
            .status()
            .is_some_and(|status| status.is_client_error())
    }

    /// Returns `true` if the station request may be retried once after re-authentication.
    /// A body-level error code is an application answer and is never retried.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

pub type Result<T> = std::result::Result<T, Error>;
