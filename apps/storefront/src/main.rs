//! # PixelMart Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pixelmart (binary)                               │
//! │                                                                         │
//! │  stdin ──► Shell ──► commands ──► CartStore ──► SQLite snapshot slot    │
//! │                          │                                              │
//! │                          └──────► HttpMarketplace ──► /products /orders │
//! │                                                                         │
//! │  stdout ◄── rendered cart / order output                                │
//! │  stderr ◄── tracing logs                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use pixelmart_storefront::client::HttpMarketplace;
use pixelmart_storefront::config::StorefrontConfig;
use pixelmart_storefront::shell::{render_error, Shell, HELP};
use pixelmart_storefront::{init_tracing, open_session};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    info!("Starting PixelMart storefront");

    let config = match StorefrontConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let marketplace = match HttpMarketplace::new(&config.api_url, config.http_timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Cannot build marketplace client");
            return ExitCode::FAILURE;
        }
    };

    let (cart, db) = match open_session(&config).await {
        Ok(session) => session,
        Err(e) => {
            eprint!("{}", render_error(&e));
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = tokio::io::stdout();
    if stdout.write_all(HELP.as_bytes()).await.is_err() {
        return ExitCode::FAILURE;
    }

    let mut shell = Shell::new(cart, marketplace, db.clone(), config.api_url.clone());
    let result = shell.run(BufReader::new(tokio::io::stdin()), stdout).await;

    if let Some(db) = db {
        db.close().await;
    }

    match result {
        Ok(()) => {
            info!("Storefront session ended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Shell I/O failed");
            ExitCode::FAILURE
        }
    }
}
