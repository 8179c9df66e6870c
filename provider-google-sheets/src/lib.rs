//! # Google Sheets Provider
//!
//! Implements the `SpreadsheetService` trait for Google Sheets API v4.
//!
//! ## Overview
//!
//! This module provides:
//! - Spreadsheet resolution from document URLs
//! - Range reads with formatted rendering, padded to rectangular grids
//! - Range writes with user-entered value interpretation
//! - Batch range clearing
//! - Bearer authentication via a `TokenSource`
//!
//! Every trait method maps to a single API call; callers own the retry
//! policy.

pub mod connector;
pub mod types;

pub use connector::GoogleSheetsConnector;
