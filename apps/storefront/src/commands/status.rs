//! # Status Commands
//!
//! Session diagnostics: persistence mode, fee policy, database health.

use pixelmart_core::Money;
use pixelmart_db::Database;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartStore, SnapshotStore};

/// Snapshot database health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub healthy: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

/// Response of the `status` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub slot: String,
    /// `false` once the session has fallen back to memory
    pub persistent: bool,
    pub lines: usize,
    pub tax_rate_bps: u32,
    pub flat_fee: Money,
    pub api_url: String,
    /// `None` when the database never opened
    pub database: Option<DatabaseStatus>,
}

/// Gets the current session status.
pub async fn get_status<S: SnapshotStore>(
    cart: &CartStore<S>,
    db: Option<&Database>,
    api_url: &str,
) -> Result<StatusResponse, ApiError> {
    debug!("get_status command");

    let database = match db {
        Some(db) => {
            let healthy = db.health_check().await;
            let (migrations_total, migrations_applied) = db.migration_status().await?;
            Some(DatabaseStatus {
                healthy,
                migrations_total,
                migrations_applied,
            })
        }
        None => None,
    };

    Ok(StatusResponse {
        slot: cart.slot().to_string(),
        persistent: cart.is_persistent(),
        lines: cart.line_count(),
        tax_rate_bps: cart.policy().tax_rate.bps(),
        flat_fee: cart.policy().flat_fee,
        api_url: api_url.to_string(),
        database,
    })
}
