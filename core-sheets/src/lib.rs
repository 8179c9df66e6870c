//! # Core Sheets
//!
//! Authenticated range access for remote spreadsheets.
//!
//! ## Overview
//!
//! This crate is the public facade of the workspace. It provides:
//! - [`SheetsClient`] with the range operations: bulk write, bulk read,
//!   single-cell write, range clear, single-cell read
//! - [`SheetsConfig`] wiring credentials, scopes, retry policy, and transport
//! - A1 range-address helpers ([`a1`]) built on bijective base-26 column
//!   letters
//! - The retry executor ([`retry`]) applied to credential loading and
//!   spreadsheet opening
//!
//! The client caches the service-account credential and the service
//! connector per client instance; spreadsheet handles are resolved fresh on
//! every operation.

pub mod a1;
pub mod client;
pub mod config;
pub mod error;
pub mod retry;

pub use client::{SheetsClient, DEFAULT_START_COLUMN, DEFAULT_START_ROW};
pub use config::{SheetsConfig, SheetsConfigBuilder};
pub use error::{Result, SheetsError};
