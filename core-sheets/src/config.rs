//! # Sheets Configuration Module
//!
//! Configuration for constructing a [`SheetsClient`](crate::client::SheetsClient).
//!
//! ## Overview
//!
//! The configuration uses a builder pattern to assemble the dependencies a
//! client needs: where service account credentials live, which OAuth scopes
//! to request, how network-facing calls are retried, and which transport
//! carries the requests. Validation is fail-fast so a misconfigured client
//! surfaces at build time rather than on the first remote call.
//!
//! ## Dependencies
//!
//! Everything has a default on desktop:
//!
//! - `credentials_path` - `client_secret.json` next to the working directory
//!   (or under `GITHUB_WORKSPACE` in CI)
//! - `scopes` - full spreadsheet access
//! - `retry_policy` - fixed schedule of 10 attempts, 10 s apart
//! - `HttpClient` - reqwest transport when the `desktop-shims` feature is
//!   enabled
//!
//! Tests and embedders can swap in their own `CredentialsSource`,
//! `TokenSource` or a complete `SpreadsheetService`.
//!
//! ## Usage
//!
//! ```ignore
//! use core_sheets::config::SheetsConfig;
//!
//! let config = SheetsConfig::builder()
//!     .credentials_path("/secrets/client_secret.json")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! Without the `desktop-shims` feature there is no default transport, and
//! `build()` returns an actionable capability error unless an `HttpClient`
//! (or a full `SpreadsheetService`) is injected.

use crate::error::{Result, SheetsError};
use bridge_traits::http::{HttpClient, RetryPolicy};
use bridge_traits::spreadsheet::SpreadsheetService;
use core_auth::{default_credentials_path, default_scopes, CredentialsSource, TokenSource};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the spreadsheet access client.
///
/// Use [`SheetsConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct SheetsConfig {
    /// Path to the service account key file
    pub credentials_path: PathBuf,

    /// OAuth scopes requested when exchanging the service account assertion
    pub scopes: Vec<String>,

    /// Retry schedule for credential loading and spreadsheet opening
    pub retry_policy: RetryPolicy,

    /// HTTP transport (populated during build unless a full service override
    /// is provided)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Credentials loader override (defaults to reading `credentials_path`)
    pub credentials_source: Option<Arc<dyn CredentialsSource>>,

    /// Token source override (defaults to the service account JWT flow)
    pub token_source: Option<Arc<dyn TokenSource>>,

    /// Complete spreadsheet service override, bypassing transport and auth
    pub service: Option<Arc<dyn SpreadsheetService>>,
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("credentials_path", &self.credentials_path)
            .field("scopes", &self.scopes)
            .field("retry_policy", &self.retry_policy)
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field(
                "credentials_source",
                &self
                    .credentials_source
                    .as_ref()
                    .map(|_| "CredentialsSource { ... }"),
            )
            .field(
                "token_source",
                &self.token_source.as_ref().map(|_| "TokenSource { ... }"),
            )
            .field(
                "service",
                &self.service.as_ref().map(|_| "SpreadsheetService { ... }"),
            )
            .finish()
    }
}

impl SheetsConfig {
    /// Creates a new builder for constructing a `SheetsConfig`.
    pub fn builder() -> SheetsConfigBuilder {
        SheetsConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The credentials path is not empty
    /// - At least one OAuth scope is requested
    pub fn validate(&self) -> Result<()> {
        if self.credentials_path.as_os_str().is_empty() {
            return Err(SheetsError::Config(
                "Credentials path cannot be empty".to_string(),
            ));
        }

        if self.scopes.is_empty() {
            return Err(SheetsError::Config(
                "At least one OAuth scope is required. \
                 Use .scopes() to set them or rely on the default."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(SheetsError::Capability {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for spreadsheet access. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ReqwestHttpClient. \
                 Other hosts: inject a platform transport via .http_client(), \
                 or inject a complete SpreadsheetService via .service()."
            .to_string(),
    })
}

/// Builder for constructing [`SheetsConfig`] instances.
///
/// Every knob has a default, so `SheetsConfig::builder().build()` succeeds on
/// desktop. The builder validates the assembled configuration and provides
/// actionable error messages when something is missing.
#[derive(Default)]
pub struct SheetsConfigBuilder {
    credentials_path: Option<PathBuf>,
    scopes: Option<Vec<String>>,
    retry_policy: Option<RetryPolicy>,
    http_client: Option<Arc<dyn HttpClient>>,
    credentials_source: Option<Arc<dyn CredentialsSource>>,
    token_source: Option<Arc<dyn TokenSource>>,
    service: Option<Arc<dyn SpreadsheetService>>,
}

impl SheetsConfigBuilder {
    /// Sets the path to the service account key file.
    ///
    /// Default: [`default_credentials_path()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use core_sheets::config::SheetsConfig;
    ///
    /// let builder = SheetsConfig::builder()
    ///     .credentials_path("/secrets/client_secret.json");
    /// ```
    pub fn credentials_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Sets the OAuth scopes requested during token exchange.
    ///
    /// Default: full spreadsheet access
    /// (`https://www.googleapis.com/auth/spreadsheets`).
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the retry schedule for credential loading and spreadsheet
    /// opening.
    ///
    /// Default: 10 attempts with a fixed 10 s delay between them.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the credentials loader.
    ///
    /// If not provided, credentials are read from `credentials_path` on
    /// first use.
    pub fn credentials_source(mut self, source: Arc<dyn CredentialsSource>) -> Self {
        self.credentials_source = Some(source);
        self
    }

    /// Sets the access token source.
    ///
    /// If not provided, tokens are minted through the service account JWT
    /// bearer flow using the loaded credentials.
    pub fn token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Sets a complete spreadsheet service implementation.
    ///
    /// When provided, the client talks to this service directly and skips
    /// credential loading and token exchange entirely.
    pub fn service(mut self, service: Arc<dyn SpreadsheetService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Builds the final `SheetsConfig` instance.
    ///
    /// Returns `Ok(SheetsConfig)` on success, or an error if:
    /// - No transport is available (no `HttpClient`, no `SpreadsheetService`
    ///   override, and the `desktop-shims` feature is disabled)
    /// - Configuration values are invalid
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_sheets::config::SheetsConfig;
    ///
    /// let config = SheetsConfig::builder().build()?;
    /// # Ok::<(), core_sheets::SheetsError>(())
    /// ```
    pub fn build(self) -> Result<SheetsConfig> {
        let http_client = match (&self.service, self.http_client) {
            // A full service override carries its own transport.
            (Some(_), client) => client,
            (None, Some(client)) => Some(client),
            (None, None) => Some(provide_default_http_client()?),
        };

        let config = SheetsConfig {
            credentials_path: self
                .credentials_path
                .unwrap_or_else(default_credentials_path),
            scopes: self.scopes.unwrap_or_else(default_scopes),
            retry_policy: self.retry_policy.unwrap_or_default(),
            http_client,
            credentials_source: self.credentials_source,
            token_source: self.token_source,
            service: self.service,
        };

        config.validate()?;

        Ok(config)
    }
}
