//! Error types for the sheets client

use bridge_traits::spreadsheet::SpreadsheetError;
use core_auth::AuthError;
use thiserror::Error;

/// Sheets client errors
///
/// Variants distinguish where in the operation pipeline a failure happened,
/// so callers can match on kind instead of message text. Causes are chained
/// as sources, never interpolated into the message.
#[derive(Error, Debug)]
pub enum SheetsError {
    /// The service-account credential could not be obtained
    #[error("OAuth authorization for the spreadsheet service failed")]
    Credential {
        #[from]
        source: AuthError,
    },

    /// The spreadsheet could not be opened
    #[error("Failed to open the spreadsheet")]
    OpenFailed {
        url: String,
        #[source]
        source: SpreadsheetError,
    },

    /// A remote call failed after the spreadsheet was resolved
    #[error(transparent)]
    Service(#[from] SpreadsheetError),

    /// No worksheet with the requested title exists in the spreadsheet
    #[error("Worksheet not found: {name}")]
    WorksheetNotFound { name: String },

    /// A row or column index violates 1-based addressing
    #[error("Invalid cell coordinate: {message}")]
    InvalidCoordinate { message: String },

    /// Configuration value is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required capability has no implementation wired in
    #[error("Capability missing: {capability} - {message}")]
    Capability { capability: String, message: String },
}

impl SheetsError {
    /// Whether retrying the whole operation could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Credential { source } => source.is_retryable(),
            Self::OpenFailed { source, .. } => source.is_retryable(),
            Self::Service(source) => source.is_retryable(),
            Self::WorksheetNotFound { .. }
            | Self::InvalidCoordinate { .. }
            | Self::Config(_)
            | Self::Capability { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetsError>;
