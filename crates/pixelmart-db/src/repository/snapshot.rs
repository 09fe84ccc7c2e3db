//! # Snapshot Repository
//!
//! Named key-value slots holding serialized state. The payload is opaque
//! text to this layer: shape checks belong to whoever reads it back.
//!
//! ## Write Semantics
//! Every save replaces the whole slot (upsert). Two sessions writing the
//! same slot resolve last-write-wins.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// One stored slot.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub slot: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for snapshot slot operations.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Returns the payload stored under `slot`, if any.
    pub async fn load(&self, slot: &str) -> DbResult<Option<String>> {
        Ok(self.load_record(slot).await?.map(|r| r.payload))
    }

    /// Returns the full record stored under `slot`, if any.
    pub async fn load_record(&self, slot: &str) -> DbResult<Option<SnapshotRecord>> {
        let record = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT slot, payload, updated_at
            FROM cart_snapshots
            WHERE slot = ?1
            "#,
        )
        .bind(slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Writes `payload` to `slot`, replacing any previous value.
    pub async fn save(&self, slot: &str, payload: &str) -> DbResult<()> {
        let now = Utc::now();

        debug!(slot = %slot, bytes = payload.len(), "Saving snapshot");

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (slot, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(slot)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes `slot`. Returns whether a row existed.
    pub async fn delete(&self, slot: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM cart_snapshots WHERE slot = ?1")
            .bind(slot)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists stored slot names in alphabetical order.
    pub async fn slots(&self) -> DbResult<Vec<String>> {
        let slots: Vec<String> =
            sqlx::query_scalar("SELECT slot FROM cart_snapshots ORDER BY slot ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(slots)
    }
}
