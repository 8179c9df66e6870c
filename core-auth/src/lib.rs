//! Service-account authentication for the spreadsheet service.
//!
//! This crate turns an on-disk service-account key into bearer tokens:
//!
//! 1. [`FileCredentialsSource`] reads and validates `client_secret.json`.
//! 2. [`ServiceAccountTokenSource`] signs an RFC 7523 assertion with the
//!    key and exchanges it at the token endpoint, caching the result until
//!    shortly before expiry.
//!
//! Network access goes through the [`bridge_traits::http::HttpClient`]
//! boundary, so the whole flow is testable without a live endpoint.

pub mod error;
pub mod source;
pub mod token;
pub mod types;

pub use error::{AuthError, Result};
pub use source::{
    default_credentials_path, CredentialsSource, FileCredentialsSource, CREDENTIALS_FILE_NAME,
};
pub use token::{ServiceAccountTokenSource, StaticTokenSource, TokenSource};
pub use types::{
    default_scopes, AccessToken, ServiceAccountKey, SheetsCredentials, SCOPE_SPREADSHEETS,
    SCOPE_SPREADSHEETS_READONLY,
};
