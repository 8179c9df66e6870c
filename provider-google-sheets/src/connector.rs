//! Google Sheets API connector implementation
//!
//! Implements the `SpreadsheetService` trait for Google Sheets API v4.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::spreadsheet::{
    CellGrid, SpreadsheetError, SpreadsheetInfo, SpreadsheetResult, SpreadsheetService,
    WorksheetInfo,
};
use core_auth::TokenSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::types::{
    BatchClearRequest, BatchClearResponse, ErrorResponse, SpreadsheetResponse,
    UpdateValuesResponse, ValueRange,
};

/// Google Sheets API base URL
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Fields to request for spreadsheet metadata
const SPREADSHEET_FIELDS: &str = "spreadsheetId,properties.title,sheets.properties";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Sheets API connector
///
/// Implements `SpreadsheetService` for Google Sheets API v4. Each method
/// issues exactly one API call; retry policy belongs to the caller.
///
/// # Example
///
/// ```ignore
/// use provider_google_sheets::GoogleSheetsConnector;
/// use bridge_traits::spreadsheet::SpreadsheetService;
///
/// let connector = GoogleSheetsConnector::new(http_client, token_source);
/// let info = connector.open_by_url(&url).await?;
/// ```
pub struct GoogleSheetsConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Bearer-token supplier for the Authorization header
    token_source: Arc<dyn TokenSource>,
}

impl GoogleSheetsConnector {
    /// Create a new Google Sheets connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `token_source` - supplies tokens with the `spreadsheets` scope
    pub fn new(http_client: Arc<dyn HttpClient>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http_client,
            token_source,
        }
    }

    /// Extract the spreadsheet id from a document URL.
    ///
    /// Document URLs carry the id in the path segment after `d`, e.g.
    /// `https://docs.google.com/spreadsheets/d/{id}/edit#gid=0`.
    pub fn parse_spreadsheet_url(url: &str) -> SpreadsheetResult<String> {
        let parsed = url::Url::parse(url).map_err(|_| SpreadsheetError::InvalidUrl {
            url: url.to_string(),
        })?;

        let mut segments = parsed
            .path_segments()
            .ok_or_else(|| SpreadsheetError::InvalidUrl {
                url: url.to_string(),
            })?;

        segments
            .find(|segment| *segment == "d")
            .and_then(|_| segments.next())
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
            .ok_or_else(|| SpreadsheetError::InvalidUrl {
                url: url.to_string(),
            })
    }

    async fn bearer_token(&self) -> SpreadsheetResult<String> {
        self.token_source
            .access_token()
            .await
            .map_err(|e| SpreadsheetError::Unauthorized {
                message: e.to_string(),
            })
    }

    async fn execute(&self, request: HttpRequest) -> SpreadsheetResult<HttpResponse> {
        self.http_client
            .execute(request)
            .await
            .map_err(|e| SpreadsheetError::Network {
                message: e.to_string(),
            })
    }

    /// Map a non-success API response to the shared error taxonomy.
    fn api_error(&self, spreadsheet_id: &str, response: &HttpResponse) -> SpreadsheetError {
        let message = serde_json::from_slice::<ErrorResponse>(&response.body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).to_string());

        warn!(
            status = response.status,
            error = %message,
            "Sheets API request failed"
        );

        match response.status {
            401 => SpreadsheetError::Unauthorized { message },
            403 => SpreadsheetError::PermissionDenied,
            404 => SpreadsheetError::SpreadsheetNotFound {
                spreadsheet_id: spreadsheet_id.to_string(),
            },
            status => SpreadsheetError::Api {
                status_code: status,
                message,
            },
        }
    }

    fn parse_body<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> SpreadsheetResult<T> {
        serde_json::from_slice(&response.body).map_err(|e| SpreadsheetError::Parse {
            message: e.to_string(),
        })
    }

    /// Render one cell scalar the way the grid model expects.
    fn value_to_string(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(true) => "TRUE".to_string(),
            serde_json::Value::Bool(false) => "FALSE".to_string(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Convert API rows to a rectangular grid padded with empty strings.
    fn to_cell_grid(values: Vec<Vec<serde_json::Value>>) -> CellGrid {
        let width = values.iter().map(|row| row.len()).max().unwrap_or(0);

        values
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.iter().map(Self::value_to_string).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect()
    }

    fn values_url(spreadsheet_id: &str, range: &str, params: &str) -> String {
        format!(
            "{}/{}/values/{}?{}",
            SHEETS_API_BASE,
            spreadsheet_id,
            urlencoding::encode(range),
            params
        )
    }
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsConnector {
    #[instrument(skip(self), fields(url = %url))]
    async fn open_by_url(&self, url: &str) -> SpreadsheetResult<SpreadsheetInfo> {
        let spreadsheet_id = Self::parse_spreadsheet_url(url)?;
        info!(spreadsheet_id = %spreadsheet_id, "Opening spreadsheet");

        let token = self.bearer_token().await?;
        let request_url = format!(
            "{}/{}?fields={}",
            SHEETS_API_BASE, spreadsheet_id, SPREADSHEET_FIELDS
        );

        let request = HttpRequest::new(HttpMethod::Get, request_url)
            .bearer_token(token)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(self.api_error(&spreadsheet_id, &response));
        }

        let metadata: SpreadsheetResponse = Self::parse_body(&response)?;

        let worksheets: Vec<WorksheetInfo> = metadata
            .sheets
            .into_iter()
            .map(|sheet| WorksheetInfo {
                sheet_id: sheet.properties.sheet_id,
                title: sheet.properties.title,
                row_count: sheet.properties.grid_properties.row_count,
                column_count: sheet.properties.grid_properties.column_count,
            })
            .collect();

        debug!(
            title = %metadata.properties.title,
            worksheets = worksheets.len(),
            "Resolved spreadsheet"
        );

        Ok(SpreadsheetInfo {
            spreadsheet_id: metadata.spreadsheet_id,
            title: metadata.properties.title,
            worksheets,
        })
    }

    #[instrument(skip(self), fields(spreadsheet_id = %spreadsheet_id, range = %range))]
    async fn read_values(&self, spreadsheet_id: &str, range: &str) -> SpreadsheetResult<CellGrid> {
        info!("Reading values");

        let token = self.bearer_token().await?;
        let request_url = Self::values_url(
            spreadsheet_id,
            range,
            "majorDimension=ROWS&valueRenderOption=FORMATTED_VALUE",
        );

        let request = HttpRequest::new(HttpMethod::Get, request_url)
            .bearer_token(token)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(self.api_error(spreadsheet_id, &response));
        }

        let value_range: ValueRange = Self::parse_body(&response)?;
        let grid = Self::to_cell_grid(value_range.values);

        debug!(rows = grid.len(), "Read values");
        Ok(grid)
    }

    #[instrument(skip(self, values), fields(spreadsheet_id = %spreadsheet_id, range = %range))]
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellGrid,
    ) -> SpreadsheetResult<()> {
        info!(rows = values.len(), "Writing values");

        let token = self.bearer_token().await?;
        let request_url = Self::values_url(spreadsheet_id, range, "valueInputOption=USER_ENTERED");

        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values: values
                .into_iter()
                .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                .collect(),
        };

        let request = HttpRequest::new(HttpMethod::Put, request_url)
            .bearer_token(token)
            .json(&body)
            .map_err(|e| SpreadsheetError::Parse {
                message: e.to_string(),
            })?
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(self.api_error(spreadsheet_id, &response));
        }

        let update: UpdateValuesResponse = Self::parse_body(&response)?;
        debug!(updated_cells = update.updated_cells, "Wrote values");
        Ok(())
    }

    #[instrument(skip(self, ranges), fields(spreadsheet_id = %spreadsheet_id))]
    async fn clear_values(
        &self,
        spreadsheet_id: &str,
        ranges: Vec<String>,
    ) -> SpreadsheetResult<()> {
        info!(ranges = ranges.len(), "Clearing ranges");

        let token = self.bearer_token().await?;
        let request_url = format!("{}/{}/values:batchClear", SHEETS_API_BASE, spreadsheet_id);

        let request = HttpRequest::new(HttpMethod::Post, request_url)
            .bearer_token(token)
            .json(&BatchClearRequest { ranges })
            .map_err(|e| SpreadsheetError::Parse {
                message: e.to_string(),
            })?
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(self.api_error(spreadsheet_id, &response));
        }

        let cleared: BatchClearResponse = Self::parse_body(&response)?;
        debug!(cleared = cleared.cleared_ranges.len(), "Cleared ranges");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use core_auth::StaticTokenSource;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(
                &self,
                request: HttpRequest,
            ) -> bridge_traits::error::Result<HttpResponse>;
        }
    }

    mock! {
        Tokens {}

        #[async_trait]
        impl TokenSource for Tokens {
            async fn access_token(&self) -> core_auth::Result<String>;
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.as_bytes().to_vec()),
        }
    }

    fn connector(mock_http: MockHttpClient) -> GoogleSheetsConnector {
        GoogleSheetsConnector::new(
            Arc::new(mock_http),
            Arc::new(StaticTokenSource::new("test_token")),
        )
    }

    const DOC_URL: &str = "https://docs.google.com/spreadsheets/d/abc123/edit#gid=0";

    #[test]
    fn test_parse_spreadsheet_url() {
        let id = GoogleSheetsConnector::parse_spreadsheet_url(DOC_URL).unwrap();
        assert_eq!(id, "abc123");

        let id = GoogleSheetsConnector::parse_spreadsheet_url(
            "https://docs.google.com/spreadsheets/d/abc123",
        )
        .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_parse_spreadsheet_url_rejects_malformed() {
        let result =
            GoogleSheetsConnector::parse_spreadsheet_url("https://docs.google.com/spreadsheets");
        assert!(matches!(result, Err(SpreadsheetError::InvalidUrl { .. })));

        let result = GoogleSheetsConnector::parse_spreadsheet_url("not a url");
        assert!(matches!(result, Err(SpreadsheetError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_open_by_url_success() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Get);
            assert!(req
                .url
                .starts_with("https://sheets.googleapis.com/v4/spreadsheets/abc123?fields="));
            assert_eq!(
                req.headers.get("Authorization"),
                Some(&"Bearer test_token".to_string())
            );

            Ok(json_response(
                200,
                r#"{
                    "spreadsheetId": "abc123",
                    "properties": { "title": "Budget" },
                    "sheets": [
                        {
                            "properties": {
                                "sheetId": 0,
                                "title": "Data",
                                "gridProperties": { "rowCount": 100, "columnCount": 26 }
                            }
                        }
                    ]
                }"#,
            ))
        });

        let info = connector(mock_http).open_by_url(DOC_URL).await.unwrap();

        assert_eq!(info.spreadsheet_id, "abc123");
        assert_eq!(info.title, "Budget");
        assert_eq!(info.worksheets.len(), 1);
        assert_eq!(info.worksheets[0].title, "Data");
        assert_eq!(info.worksheets[0].row_count, 100);
    }

    #[tokio::test]
    async fn test_open_by_url_permission_denied() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                403,
                r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#,
            ))
        });

        let err = connector(mock_http).open_by_url(DOC_URL).await.unwrap_err();

        assert!(matches!(err, SpreadsheetError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_open_by_url_not_found() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                404,
                r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
            ))
        });

        let err = connector(mock_http).open_by_url(DOC_URL).await.unwrap_err();

        assert!(
            matches!(err, SpreadsheetError::SpreadsheetNotFound { spreadsheet_id } if spreadsheet_id == "abc123")
        );
    }

    #[tokio::test]
    async fn test_server_error_is_retryable_api_error() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(503, "backend unavailable")));

        let err = connector(mock_http).open_by_url(DOC_URL).await.unwrap_err();

        assert!(matches!(err, SpreadsheetError::Api { status_code: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_read_values_pads_ragged_rows() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.url.contains("/values/%27Data%27%21A1%3AC2"));
            assert!(req.url.contains("majorDimension=ROWS"));
            assert!(req.url.contains("valueRenderOption=FORMATTED_VALUE"));

            Ok(json_response(
                200,
                r#"{
                    "range": "'Data'!A1:C2",
                    "majorDimension": "ROWS",
                    "values": [
                        ["name", 42, true],
                        ["x"]
                    ]
                }"#,
            ))
        });

        let grid = connector(mock_http)
            .read_values("abc123", "'Data'!A1:C2")
            .await
            .unwrap();

        assert_eq!(
            grid,
            vec![
                vec!["name".to_string(), "42".to_string(), "TRUE".to_string()],
                vec!["x".to_string(), String::new(), String::new()],
            ]
        );
    }

    #[tokio::test]
    async fn test_read_values_empty_worksheet() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                200,
                r#"{ "range": "'Data'!A1:Z1000", "majorDimension": "ROWS" }"#,
            ))
        });

        let grid = connector(mock_http)
            .read_values("abc123", "'Data'")
            .await
            .unwrap();

        assert!(grid.is_empty());
    }

    #[tokio::test]
    async fn test_update_values_sends_user_entered_put() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Put);
            assert!(req.url.contains("valueInputOption=USER_ENTERED"));
            assert_eq!(
                req.headers.get("Content-Type"),
                Some(&"application/json".to_string())
            );

            let body: ValueRange = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
            assert_eq!(body.major_dimension.as_deref(), Some("ROWS"));
            assert_eq!(body.values.len(), 2);
            assert_eq!(body.values[0][0], serde_json::json!("a"));

            Ok(json_response(
                200,
                r#"{"spreadsheetId":"abc123","updatedRange":"'Data'!A2:B3","updatedRows":2,"updatedColumns":2,"updatedCells":4}"#,
            ))
        });

        connector(mock_http)
            .update_values(
                "abc123",
                "'Data'!A2",
                vec![
                    vec!["a".to_string(), "b".to_string()],
                    vec!["c".to_string(), "d".to_string()],
                ],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_clear_values_posts_batch_clear() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Post);
            assert!(req.url.ends_with("/abc123/values:batchClear"));

            let body: serde_json::Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
            assert_eq!(body["ranges"][0], "'Data'!A2:C5");

            Ok(json_response(
                200,
                r#"{"spreadsheetId":"abc123","clearedRanges":["'Data'!A2:C5"]}"#,
            ))
        });

        connector(mock_http)
            .clear_values("abc123", vec!["'Data'!A2:C5".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_token_failure_maps_to_unauthorized() {
        let mock_http = MockHttpClient::new();
        let mut mock_tokens = MockTokens::new();

        mock_tokens.expect_access_token().times(1).returning(|| {
            Err(core_auth::AuthError::TokenExchange {
                status_code: 400,
                message: "invalid_grant".to_string(),
            })
        });

        let connector = GoogleSheetsConnector::new(Arc::new(mock_http), Arc::new(mock_tokens));
        let err = connector.open_by_url(DOC_URL).await.unwrap_err();

        assert!(matches!(err, SpreadsheetError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_network() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Err(bridge_traits::error::BridgeError::Timeout(
                "deadline exceeded".to_string(),
            ))
        });

        let err = connector(mock_http).open_by_url(DOC_URL).await.unwrap_err();

        assert!(matches!(err, SpreadsheetError::Network { .. }));
        assert!(err.is_retryable());
    }
}
