//! Spreadsheet Service Boundary
//!
//! The remote spreadsheet service is an external collaborator. This module
//! defines the trait the core calls through, the handle types it receives,
//! and the error taxonomy both sides of the seam share.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A worksheet grid: rows of string cells.
pub type CellGrid = Vec<Vec<String>>;

/// Metadata for one worksheet (a named tab within a spreadsheet document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetInfo {
    /// Service-assigned numeric id of the worksheet
    pub sheet_id: i64,
    /// Worksheet title, unique within its spreadsheet
    pub title: String,
    /// Number of rows in the worksheet grid
    pub row_count: u32,
    /// Number of columns in the worksheet grid
    pub column_count: u32,
}

/// A resolved spreadsheet document handle.
///
/// Resolved fresh for every operation; holding one across calls gives no
/// freshness guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetInfo {
    /// Service-assigned spreadsheet id (the `d/{id}` URL segment)
    pub spreadsheet_id: String,
    /// Document title
    pub title: String,
    /// Worksheets contained in the document
    pub worksheets: Vec<WorksheetInfo>,
}

impl SpreadsheetInfo {
    /// Look up a worksheet by exact title.
    pub fn worksheet(&self, title: &str) -> Option<&WorksheetInfo> {
        self.worksheets.iter().find(|w| w.title == title)
    }
}

/// Failures crossing the spreadsheet service boundary.
///
/// Variants are matchable kinds: callers decide retryable vs. terminal from
/// the variant, never from message text. `Display` strings are fixed; the
/// underlying cause, where present, rides in a field.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The authenticated principal may not access the spreadsheet.
    #[error("You do not have permission to access this spreadsheet")]
    PermissionDenied,

    /// No spreadsheet exists behind the resolved id.
    #[error("Spreadsheet not found: {spreadsheet_id}")]
    SpreadsheetNotFound { spreadsheet_id: String },

    /// The document URL does not contain a spreadsheet id.
    #[error("Not a recognizable spreadsheet URL: {url}")]
    InvalidUrl { url: String },

    /// The service rejected the caller's authorization.
    #[error("Authorization with the spreadsheet service failed: {message}")]
    Unauthorized { message: String },

    /// The service answered with a non-success status.
    #[error("Spreadsheet service error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// The service could not be reached.
    #[error("Failed to reach the spreadsheet service: {message}")]
    Network { message: String },

    /// The service answered with a body this client cannot decode.
    #[error("Failed to parse spreadsheet service response: {message}")]
    Parse { message: String },
}

impl SpreadsheetError {
    /// Whether a retry with the same inputs could plausibly succeed.
    ///
    /// Rate limiting and server-side failures are transient; everything else
    /// (permissions, missing documents, malformed URLs, decode failures) is
    /// terminal and retrying would only repeat the failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status_code, .. } => *status_code == 429 || *status_code >= 500,
            Self::PermissionDenied
            | Self::SpreadsheetNotFound { .. }
            | Self::InvalidUrl { .. }
            | Self::Unauthorized { .. }
            | Self::Parse { .. } => false,
        }
    }
}

pub type SpreadsheetResult<T> = std::result::Result<T, SpreadsheetError>;

/// Remote spreadsheet service operations consumed by the core.
///
/// Exactly one remote call per method; implementations must not retry
/// internally. Range strings use A1 notation with the worksheet title
/// prefix (e.g. `'Sheet One'!A2:C5`) and are built by the caller.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Resolve a spreadsheet document from its URL.
    async fn open_by_url(&self, url: &str) -> SpreadsheetResult<SpreadsheetInfo>;

    /// Read the values in `range`, padded to a rectangle.
    ///
    /// A range naming only a worksheet (e.g. `'Sheet One'`) reads the whole
    /// worksheet. An empty worksheet reads as an empty grid.
    async fn read_values(&self, spreadsheet_id: &str, range: &str) -> SpreadsheetResult<CellGrid>;

    /// Write `values` anchored at the start of `range` with user-entered
    /// interpretation (formulas evaluate, numbers and dates coerce).
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellGrid,
    ) -> SpreadsheetResult<()>;

    /// Clear every cell in the given ranges.
    async fn clear_values(&self, spreadsheet_id: &str, ranges: Vec<String>) -> SpreadsheetResult<()>;
}
