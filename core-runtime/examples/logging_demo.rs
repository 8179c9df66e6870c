//! Logging system demonstration
//!
//! This example shows how to use the logging infrastructure in different modes.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format
//! cargo run --example logging_demo -- compact
//!
//! # With custom filter
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use bridge_traits::time::LogLevel;
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};
use std::env;
use tracing::{debug, error, info, instrument, span, trace, warn, Level};

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let format = if args.len() > 1 {
        match args[1].as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Pretty,
        }
    } else {
        LogFormat::default()
    };

    let filter = args.get(2).cloned();

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true)
        .with_target(true);

    if let Some(f) = filter {
        config = config.with_filter(f);
    }

    init_logging(config).expect("Failed to initialize logging");

    info!("=== Logging System Demo ===");
    info!(format = ?format, "Logging initialized");

    demo_log_levels();
    demo_structured_logging();
    demo_spans().await;
    demo_redaction();
    demo_instrumentation().await;

    info!("=== Demo Complete ===");
}

fn demo_log_levels() {
    let span = span!(Level::INFO, "log_levels");
    let _enter = span.enter();

    trace!("This is a TRACE level log");
    debug!("This is a DEBUG level log");
    info!("This is an INFO level log");
    warn!("This is a WARN level log");
    error!("This is an ERROR level log");
}

fn demo_structured_logging() {
    let span = span!(Level::INFO, "structured_logging");
    let _enter = span.enter();

    info!("Simple message without fields");

    info!(
        spreadsheet_id = "1BxiMVs0XRA5nFMd",
        worksheet = "Raw Data",
        range = "'Raw Data'!A2:C5",
        "Range write"
    );

    info!(
        rows = 42,
        columns = 7,
        cleared_ranges = 1,
        "Operation summary"
    );
}

async fn demo_spans() {
    let span = span!(Level::INFO, "bulk_write", worksheet = "Data");
    let _enter = span.enter();

    info!("Starting bulk write");

    {
        let inner_span = span!(Level::DEBUG, "clear_previous");
        let _inner = inner_span.enter();

        debug!(range = "'Data'!A2:C20", "Cleared previous contents");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    {
        let inner_span = span!(Level::DEBUG, "write_values");
        let _inner = inner_span.enter();

        debug!(rows = 18, "Writing replacement values");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    info!(cells_written = 54, "Bulk write completed");
}

fn demo_redaction() {
    let span = span!(Level::INFO, "redaction");
    let _enter = span.enter();

    // These values will be redacted by the helper
    let token = "ya29.fake_access_token";
    let email = "robot@demo-project.iam.gserviceaccount.com";

    info!(
        token = %redact_if_sensitive("access_token", token),
        email = %redact_if_sensitive("client_email", email),
        "Sensitive data example"
    );

    info!("Authentication successful");
}

#[instrument]
async fn demo_instrumentation() {
    info!("Instrumented function automatically creates spans");

    let worksheets = vec!["Summary", "Raw Data", "Archive"];
    process_worksheets(&worksheets).await;
}

#[instrument(fields(count = worksheets.len()))]
async fn process_worksheets(worksheets: &[&str]) {
    debug!("Processing worksheets");

    for (idx, worksheet) in worksheets.iter().enumerate() {
        process_worksheet(idx, worksheet).await;
    }

    info!("All worksheets processed");
}

#[instrument(fields(worksheet_index = idx))]
async fn process_worksheet(idx: usize, worksheet: &str) {
    trace!(worksheet = %worksheet, "Processing individual worksheet");
    tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
}
