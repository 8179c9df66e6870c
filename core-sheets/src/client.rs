//! # Spreadsheet Client
//!
//! The session object for authenticated spreadsheet access.
//!
//! ## Overview
//!
//! [`SheetsClient`] wires the credential loader, the token source, and the
//! service connector together behind the range operations callers use: bulk
//! write, bulk read, single-cell write, range clear, and single-cell read.
//!
//! The client caches exactly two things for its lifetime: the loaded
//! service-account credential and the connector built from it. Both are
//! populated lazily on first use, with concurrent first use serialized by an
//! async once-cell. Spreadsheet handles are never cached; every operation
//! re-resolves the document from its URL.
//!
//! Retries happen at exactly two places: loading the credential and opening
//! the spreadsheet, each wrapped with the configured [`RetryPolicy`]
//! (default: 10 attempts, 10 s apart). Value calls after a successful open
//! run once; their failures are logged and propagated unchanged.
//!
//! [`RetryPolicy`]: bridge_traits::http::RetryPolicy
//!
//! ## Usage
//!
//! ```ignore
//! use core_sheets::{SheetsClient, SheetsConfig};
//!
//! let client = SheetsClient::new(SheetsConfig::builder().build()?);
//! let rows = client.read_all_values(&url, "Raw Data").await?;
//! ```

use std::sync::Arc;

use bridge_traits::spreadsheet::{
    CellGrid, SpreadsheetError, SpreadsheetInfo, SpreadsheetService, WorksheetInfo,
};
use core_auth::{
    AuthError, CredentialsSource, FileCredentialsSource, ServiceAccountTokenSource,
    SheetsCredentials, TokenSource,
};
use provider_google_sheets::GoogleSheetsConnector;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument};

use crate::a1;
use crate::config::SheetsConfig;
use crate::error::{Result, SheetsError};
use crate::retry::with_retry;

/// Default first row for bulk writes, leaving row 1 to the header.
pub const DEFAULT_START_ROW: u32 = 2;

/// Default first column for bulk writes.
pub const DEFAULT_START_COLUMN: u32 = 1;

/// Authenticated client for one remote spreadsheet service.
///
/// Cheap to keep around: the credential and the connector are created once
/// per client, everything else per operation. Clone the wrapping `Arc` to
/// share a client across tasks.
pub struct SheetsClient {
    config: SheetsConfig,
    credentials_source: Arc<dyn CredentialsSource>,
    credentials: OnceCell<SheetsCredentials>,
    service: OnceCell<Arc<dyn SpreadsheetService>>,
}

impl SheetsClient {
    /// Creates a client from a built configuration.
    ///
    /// No credential is loaded and no network traffic happens here; the
    /// first range operation triggers both.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_sheets::{SheetsClient, SheetsConfig};
    ///
    /// let client = SheetsClient::new(SheetsConfig::builder().build()?);
    /// ```
    pub fn new(config: SheetsConfig) -> Self {
        let credentials_source: Arc<dyn CredentialsSource> = match &config.credentials_source {
            Some(source) => source.clone(),
            None => Arc::new(FileCredentialsSource::new(
                config.credentials_path.clone(),
                config.scopes.clone(),
            )),
        };

        Self {
            config,
            credentials_source,
            credentials: OnceCell::new(),
            service: OnceCell::new(),
        }
    }

    /// The loaded service-account credential, loading it on first call.
    ///
    /// The load is retried per the configured policy while the failure is
    /// retryable. A failed load leaves the cell empty, so a later operation
    /// attempts the load again; a success is cached for the client's
    /// lifetime.
    async fn credentials(&self) -> Result<&SheetsCredentials> {
        self.credentials
            .get_or_try_init(|| async {
                let loaded = with_retry(
                    &self.config.retry_policy,
                    "load_credentials",
                    AuthError::is_retryable,
                    || self.credentials_source.load(),
                )
                .await;

                match loaded {
                    Ok(credentials) => {
                        info!(
                            client_email = credentials.client_email(),
                            "Service account credentials loaded"
                        );
                        Ok(credentials)
                    }
                    Err(error) => {
                        error!(
                            error = %error,
                            "OAuth authorization for the spreadsheet service failed"
                        );
                        Err(SheetsError::Credential { source: error })
                    }
                }
            })
            .await
    }

    /// The spreadsheet service this client talks to.
    ///
    /// An injected service stands in for an already authorized remote
    /// collaborator and bypasses credential loading. Otherwise the
    /// credential is ensured first and a connector is built over the
    /// configured transport, once per client.
    async fn service(&self) -> Result<Arc<dyn SpreadsheetService>> {
        if let Some(service) = &self.config.service {
            return Ok(service.clone());
        }

        let service = self
            .service
            .get_or_try_init(|| async {
                let credentials = self.credentials().await?;

                let http_client = match self.config.http_client.clone() {
                    Some(client) => client,
                    None => {
                        return Err(SheetsError::Capability {
                            capability: "HttpClient".to_string(),
                            message: "No HTTP transport configured for the spreadsheet \
                                      connector. Enable the 'desktop-shims' feature or inject \
                                      one via SheetsConfig::builder().http_client(..)."
                                .to_string(),
                        })
                    }
                };

                let token_source: Arc<dyn TokenSource> = match &self.config.token_source {
                    Some(source) => source.clone(),
                    None => Arc::new(ServiceAccountTokenSource::new(
                        credentials.clone(),
                        http_client.clone(),
                    )),
                };

                let connector: Arc<dyn SpreadsheetService> =
                    Arc::new(GoogleSheetsConnector::new(http_client, token_source));
                Ok(connector)
            })
            .await?;

        Ok(service.clone())
    }

    /// Resolve the spreadsheet behind `url`, retrying transient failures.
    ///
    /// Permission failures keep their fixed user-facing message; every other
    /// failure is wrapped with the URL for context, the underlying cause
    /// riding along as the error source.
    async fn open_spreadsheet(
        &self,
        service: &Arc<dyn SpreadsheetService>,
        url: &str,
    ) -> Result<SpreadsheetInfo> {
        let opened = with_retry(
            &self.config.retry_policy,
            "open_spreadsheet",
            SpreadsheetError::is_retryable,
            || service.open_by_url(url),
        )
        .await;

        match opened {
            Ok(spreadsheet) => Ok(spreadsheet),
            Err(SpreadsheetError::PermissionDenied) => {
                error!(url, "You do not have permission to access this spreadsheet");
                Err(SheetsError::Service(SpreadsheetError::PermissionDenied))
            }
            Err(error) => {
                error!(url, error = %error, "Failed to open the spreadsheet");
                Err(SheetsError::OpenFailed {
                    url: url.to_string(),
                    source: error,
                })
            }
        }
    }

    /// Select a worksheet from the resolved spreadsheet by exact title.
    fn resolve_worksheet<'a>(
        &self,
        spreadsheet: &'a SpreadsheetInfo,
        title: &str,
    ) -> Result<&'a WorksheetInfo> {
        match spreadsheet.worksheet(title) {
            Some(worksheet) => Ok(worksheet),
            None => {
                error!(
                    spreadsheet_id = %spreadsheet.spreadsheet_id,
                    worksheet = title,
                    "Worksheet not found"
                );
                Err(SheetsError::WorksheetNotFound {
                    name: title.to_string(),
                })
            }
        }
    }

    fn require_positive(&self, value: u32, field: &str) -> Result<()> {
        if value == 0 {
            return Err(SheetsError::InvalidCoordinate {
                message: format!("{} must be at least 1, got 0", field),
            });
        }
        Ok(())
    }

    /// Log a failed value call and pass the error through unchanged.
    fn service_failure(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        action: &'static str,
        error: SpreadsheetError,
    ) -> SheetsError {
        error!(
            spreadsheet_id,
            worksheet,
            action,
            error = %error,
            "Spreadsheet operation failed"
        );
        SheetsError::Service(error)
    }

    /// Replace the worksheet's data region with `values`.
    ///
    /// Equivalent to [`write_all_values_at`](Self::write_all_values_at)
    /// anchored at row 2, column 1, leaving row 1 to the header.
    pub async fn write_all_values(
        &self,
        url: &str,
        worksheet: &str,
        values: CellGrid,
    ) -> Result<()> {
        self.write_all_values_at(url, worksheet, values, DEFAULT_START_ROW, DEFAULT_START_COLUMN)
            .await
    }

    /// Replace worksheet content with `values`, anchored at the given cell.
    ///
    /// Existing values are read first to find the occupied rectangle. A
    /// worksheet holding more than one row is cleared from the anchor down
    /// to the last occupied row and column before writing, so stale rows the
    /// new grid does not cover are removed. A worksheet with at most one row
    /// (a bare header, or nothing at all) has nothing to clear and is
    /// written directly.
    ///
    /// Values are written with user-entered interpretation: formulas
    /// evaluate, numbers and dates coerce. An empty `values` grid is a
    /// no-op.
    #[instrument(skip(self, values), fields(rows = values.len()))]
    pub async fn write_all_values_at(
        &self,
        url: &str,
        worksheet: &str,
        values: CellGrid,
        start_row: u32,
        start_column: u32,
    ) -> Result<()> {
        self.require_positive(start_row, "start_row")?;
        self.require_positive(start_column, "start_column")?;

        if values.is_empty() {
            info!("No rows to write");
            return Ok(());
        }

        let service = self.service().await?;
        let spreadsheet = self.open_spreadsheet(&service, url).await?;
        let target = self.resolve_worksheet(&spreadsheet, worksheet)?;
        let spreadsheet_id = spreadsheet.spreadsheet_id.as_str();

        let existing = service
            .read_values(spreadsheet_id, &a1::worksheet_all(&target.title))
            .await
            .map_err(|e| {
                self.service_failure(spreadsheet_id, worksheet, "read existing values", e)
            })?;

        let existing_rows = existing.len() as u32;
        let existing_columns = existing.first().map_or(0, |row| row.len()) as u32;

        // Header-only and empty worksheets have nothing to clear.
        if existing_rows > 1 && existing_columns > 0 {
            let clear_range = a1::worksheet_range(
                &target.title,
                &a1::range_address(start_row, start_column, existing_rows, existing_columns),
            );
            debug!(range = %clear_range, "Clearing previous data region");
            service
                .clear_values(spreadsheet_id, vec![clear_range])
                .await
                .map_err(|e| {
                    self.service_failure(spreadsheet_id, worksheet, "clear previous values", e)
                })?;
        }

        let anchor = a1::worksheet_range(&target.title, &a1::cell_address(start_row, start_column));
        service
            .update_values(spreadsheet_id, &anchor, values)
            .await
            .map_err(|e| self.service_failure(spreadsheet_id, worksheet, "write values", e))?;

        info!(anchor = %anchor, "Wrote worksheet values");
        Ok(())
    }

    /// Read the entire worksheet as a rectangular grid of strings.
    ///
    /// Rows are padded with `""` to the widest row. An empty worksheet
    /// reads as an empty grid.
    #[instrument(skip(self))]
    pub async fn read_all_values(&self, url: &str, worksheet: &str) -> Result<CellGrid> {
        let service = self.service().await?;
        let spreadsheet = self.open_spreadsheet(&service, url).await?;
        let target = self.resolve_worksheet(&spreadsheet, worksheet)?;

        let values = service
            .read_values(&spreadsheet.spreadsheet_id, &a1::worksheet_all(&target.title))
            .await
            .map_err(|e| {
                self.service_failure(&spreadsheet.spreadsheet_id, worksheet, "read values", e)
            })?;

        info!(rows = values.len(), "Read worksheet values");
        Ok(values)
    }

    /// Write a single cell with user-entered interpretation.
    #[instrument(skip(self, value))]
    pub async fn write_cell(
        &self,
        url: &str,
        worksheet: &str,
        row: u32,
        column: u32,
        value: &str,
    ) -> Result<()> {
        self.require_positive(row, "row")?;
        self.require_positive(column, "column")?;

        let service = self.service().await?;
        let spreadsheet = self.open_spreadsheet(&service, url).await?;
        let target = self.resolve_worksheet(&spreadsheet, worksheet)?;

        let range = a1::worksheet_range(&target.title, &a1::cell_address(row, column));
        service
            .update_values(
                &spreadsheet.spreadsheet_id,
                &range,
                vec![vec![value.to_string()]],
            )
            .await
            .map_err(|e| {
                self.service_failure(&spreadsheet.spreadsheet_id, worksheet, "write cell", e)
            })?;

        debug!(range = %range, "Wrote cell value");
        Ok(())
    }

    /// Overwrite a rectangle of cells with empty strings.
    ///
    /// The rectangle starts at (`row_start`, `column_start`) and spans
    /// `row_count` rows by `column_count` columns, all 1-based and
    /// inclusive: (3, 2, 2, 3) clears `B3:D4`. The cells are overwritten
    /// with a grid of empty strings (a user-entered write), not deleted.
    #[instrument(skip(self))]
    pub async fn clear_range(
        &self,
        url: &str,
        worksheet: &str,
        row_start: u32,
        column_start: u32,
        row_count: u32,
        column_count: u32,
    ) -> Result<()> {
        self.require_positive(row_start, "row_start")?;
        self.require_positive(column_start, "column_start")?;
        self.require_positive(row_count, "row_count")?;
        self.require_positive(column_count, "column_count")?;

        let service = self.service().await?;
        let spreadsheet = self.open_spreadsheet(&service, url).await?;
        let target = self.resolve_worksheet(&spreadsheet, worksheet)?;

        let range = a1::worksheet_range(
            &target.title,
            &a1::range_address(
                row_start,
                column_start,
                row_start + row_count - 1,
                column_start + column_count - 1,
            ),
        );
        let blanks: CellGrid = vec![vec![String::new(); column_count as usize]; row_count as usize];

        service
            .update_values(&spreadsheet.spreadsheet_id, &range, blanks)
            .await
            .map_err(|e| {
                self.service_failure(&spreadsheet.spreadsheet_id, worksheet, "clear range", e)
            })?;

        info!(range = %range, "Cleared range");
        Ok(())
    }

    /// Read a single cell's formatted value.
    ///
    /// An empty or never-written cell reads as `""`.
    #[instrument(skip(self))]
    pub async fn read_cell(
        &self,
        url: &str,
        worksheet: &str,
        row: u32,
        column: u32,
    ) -> Result<String> {
        self.require_positive(row, "row")?;
        self.require_positive(column, "column")?;

        let service = self.service().await?;
        let spreadsheet = self.open_spreadsheet(&service, url).await?;
        let target = self.resolve_worksheet(&spreadsheet, worksheet)?;

        let range = a1::worksheet_range(&target.title, &a1::cell_address(row, column));
        let values = service
            .read_values(&spreadsheet.spreadsheet_id, &range)
            .await
            .map_err(|e| {
                self.service_failure(&spreadsheet.spreadsheet_id, worksheet, "read cell", e)
            })?;

        let value = values
            .into_iter()
            .next()
            .and_then(|cells| cells.into_iter().next())
            .unwrap_or_default();

        debug!(range = %range, "Read cell value");
        Ok(value)
    }
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("config", &self.config)
            .field("credentials_loaded", &self.credentials.initialized())
            .finish()
    }
}
