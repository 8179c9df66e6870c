//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the spreadsheet access
//! layer:
//! - Logging and tracing infrastructure
//! - Shared runtime error types
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend on. It
//! establishes the logging conventions and output formats used throughout
//! the system.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
