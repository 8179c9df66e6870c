//! # Boundary Traits
//!
//! Abstraction traits for everything the sheet-access core does not own.
//!
//! ## Overview
//!
//! This crate defines the contract between the core crates and their external
//! collaborators: the HTTP transport and the remote spreadsheet service. Each
//! trait represents a capability the core requires but that is implemented
//! elsewhere (`bridge-desktop` for native transport,
//! `provider-google-sheets` for the spreadsheet service).
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with TLS
//!
//! ### Remote service
//! - [`SpreadsheetService`](spreadsheet::SpreadsheetService) - Open-by-URL,
//!   value reads, user-entered value writes, range clears
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Fail-Fast Strategy
//!
//! The core fails fast with descriptive errors when a required capability is
//! missing:
//!
//! ```ignore
//! let http_client = config.http_client
//!     .ok_or_else(|| SheetsError::Capability {
//!         capability: "HttpClient".to_string(),
//!         message: "No HTTP client implementation provided. \
//!                  Enable the desktop-shims feature or inject one.".to_string()
//!     })?;
//! ```
//!
//! ## Error Handling
//!
//! Transport failures use [`BridgeError`](error::BridgeError); failures
//! crossing the spreadsheet seam use the typed
//! [`SpreadsheetError`](spreadsheet::SpreadsheetError) taxonomy so callers
//! can separate retryable from terminal conditions without string matching.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` bounds to support safe concurrent usage
//! across async tasks.

pub mod error;
pub mod http;
pub mod spreadsheet;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use spreadsheet::{
    CellGrid, SpreadsheetError, SpreadsheetInfo, SpreadsheetResult, SpreadsheetService,
    WorksheetInfo,
};
pub use time::{Clock, LogLevel, SystemClock};
