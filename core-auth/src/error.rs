use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to read service account key file {path}")]
    KeyFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Service account key file {path} is not valid JSON: {message}")]
    KeyFileParse { path: PathBuf, message: String },

    #[error("Service account key is malformed: {message}")]
    MalformedKey { message: String },

    #[error("Token endpoint returned status {status_code}: {message}")]
    TokenExchange { status_code: u16, message: String },

    #[error("Failed to parse token endpoint response: {message}")]
    TokenParse { message: String },

    #[error("Network error during authorization: {message}")]
    Network { message: String },
}

impl AuthError {
    /// Whether a retry with the same inputs could plausibly succeed.
    ///
    /// A missing or unreadable-by-permission key file will not appear by
    /// waiting, and a key that does not parse never will; transient I/O,
    /// network failures, and throttled or failing token endpoints can clear.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::KeyFileRead { source, .. } => !matches!(
                source.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::TokenExchange { status_code, .. } => {
                *status_code == 429 || *status_code >= 500
            }
            Self::Network { .. } => true,
            Self::KeyFileParse { .. } | Self::MalformedKey { .. } | Self::TokenParse { .. } => {
                false
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
