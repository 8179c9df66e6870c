//! Google Sheets API response types
//!
//! Data structures for the Sheets API v4 request and response bodies.

use serde::{Deserialize, Serialize};

/// Google Sheets API spreadsheet resource (metadata subset)
///
/// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetResponse {
    /// Spreadsheet ID
    pub spreadsheet_id: String,

    /// Document-level properties
    pub properties: SpreadsheetProperties,

    /// Worksheets in the document
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

/// Document-level spreadsheet properties
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    /// Document title
    pub title: String,
}

/// A worksheet entry in the spreadsheet metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Worksheet properties
    pub properties: SheetProperties,
}

/// Worksheet properties
///
/// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets#sheetproperties
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    /// Service-assigned worksheet ID
    pub sheet_id: i64,

    /// Worksheet title
    pub title: String,

    /// Grid dimensions (absent for non-grid sheets)
    #[serde(default)]
    pub grid_properties: GridProperties,
}

/// Dimensions of a worksheet grid
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    /// Number of rows
    #[serde(default)]
    pub row_count: u32,

    /// Number of columns
    #[serde(default)]
    pub column_count: u32,
}

/// Google Sheets API value range
///
/// Used both as the `values.get` response and the `values.update` request
/// body. Cells arrive as JSON scalars even with formatted rendering, so the
/// element type stays [`serde_json::Value`].
///
/// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values#ValueRange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Range the values cover, in A1 notation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Major dimension of `values` (ROWS or COLUMNS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,

    /// Cell values; omitted entirely when the range is empty
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Google Sheets API values.update response
///
/// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values/update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    /// Spreadsheet ID
    pub spreadsheet_id: String,

    /// Range the write actually covered
    #[serde(default)]
    pub updated_range: Option<String>,

    /// Number of rows written
    #[serde(default)]
    pub updated_rows: u32,

    /// Number of columns written
    #[serde(default)]
    pub updated_columns: u32,

    /// Number of cells written
    #[serde(default)]
    pub updated_cells: u32,
}

/// Google Sheets API values.batchClear request
///
/// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values/batchClear
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClearRequest {
    /// Ranges to clear, in A1 notation
    pub ranges: Vec<String>,
}

/// Google Sheets API values.batchClear response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClearResponse {
    /// Spreadsheet ID
    pub spreadsheet_id: String,

    /// Ranges the service actually cleared
    #[serde(default)]
    pub cleared_ranges: Vec<String>,
}

/// Error envelope returned by the Sheets API on non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorDetails,
}

/// Error payload inside [`ErrorResponse`]
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetails {
    /// HTTP status code echoed by the service
    pub code: u16,

    /// Human-readable description
    pub message: String,

    /// Canonical status name (e.g. PERMISSION_DENIED)
    #[serde(default)]
    pub status: String,
}
