//! Smoke entry point for the sheets client.
//!
//! Reads one worksheet when pointed at a real spreadsheet:
//!
//! ```bash
//! SHEETS_URL="https://docs.google.com/spreadsheets/d/<id>/edit" \
//! SHEETS_WORKSHEET="Sheet1" \
//! cargo run -p core-sheets --example sheets_demo
//! ```
//!
//! Credentials come from `client_secret.json` in the working directory, or
//! from the path in `SHEETS_CREDENTIALS` when set. Without `SHEETS_URL` the
//! program only initializes logging and exits, which is enough to smoke-test
//! the wiring.

use core_runtime::logging::{init_logging, LoggingConfig};
use core_sheets::{SheetsClient, SheetsConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging(LoggingConfig::default()) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let url = match std::env::var("SHEETS_URL") {
        Ok(url) => url,
        Err(_) => {
            info!("SHEETS_URL is not set; nothing to read");
            info!("Set SHEETS_URL and SHEETS_WORKSHEET to point at a spreadsheet");
            return;
        }
    };
    let worksheet = std::env::var("SHEETS_WORKSHEET").unwrap_or_else(|_| "Sheet1".to_string());

    let mut builder = SheetsConfig::builder();
    if let Ok(path) = std::env::var("SHEETS_CREDENTIALS") {
        builder = builder.credentials_path(path);
    }

    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration failed");
            std::process::exit(1);
        }
    };

    let client = SheetsClient::new(config);

    match client.read_all_values(&url, &worksheet).await {
        Ok(grid) => {
            info!(worksheet = %worksheet, rows = grid.len(), "Worksheet read");
            for (index, row) in grid.iter().take(10).enumerate() {
                info!(row = index + 1, values = ?row);
            }
            if grid.len() > 10 {
                info!(omitted = grid.len() - 10, "Further rows omitted");
            }
        }
        Err(e) => {
            error!(error = %e, "Read failed");
            std::process::exit(1);
        }
    }
}
