//! # Snapshot Stores
//!
//! Where the cart session keeps its serialized snapshot.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SnapshotStore (trait)                              │
//! │                 load(slot) / save(slot, payload)                        │
//! │                              │                                          │
//! │          ┌───────────────────┴───────────────────┐                      │
//! │          ▼                                       ▼                      │
//! │  SnapshotRepository                      MemorySnapshotStore            │
//! │  (pixelmart-db, SQLite)                  (process memory; tests)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use pixelmart_db::{DbError, SnapshotRepository};
use thiserror::Error;
use tokio::sync::Mutex;

/// Failure reading or writing a snapshot slot.
///
/// Never shown to the shopper; the cart store logs it and carries on.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot database error: {0}")]
    Db(#[from] DbError),

    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value slot storage for serialized state.
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    async fn load(&self, slot: &str) -> Result<Option<String>, SnapshotError>;

    async fn save(&self, slot: &str, payload: &str) -> Result<(), SnapshotError>;
}

impl SnapshotStore for SnapshotRepository {
    async fn load(&self, slot: &str) -> Result<Option<String>, SnapshotError> {
        Ok(SnapshotRepository::load(self, slot).await?)
    }

    async fn save(&self, slot: &str, payload: &str) -> Result<(), SnapshotError> {
        Ok(SnapshotRepository::save(self, slot, payload).await?)
    }
}

/// In-process slot store.
///
/// Clones share the same slots, so a test can keep a handle after moving
/// one into a `CartStore`. Loads and saves can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    slots: Mutex<HashMap<String, String>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one slot.
    pub fn with_slot(slot: &str, payload: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.to_string(), payload.to_string());
        MemorySnapshotStore {
            inner: Arc::new(MemoryInner {
                slots: Mutex::new(slots),
                ..MemoryInner::default()
            }),
        }
    }

    pub fn fail_loads(&self, fail: bool) {
        self.inner.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    /// Current payload of `slot`, bypassing failure injection.
    pub async fn payload(&self, slot: &str) -> Option<String> {
        self.inner.slots.lock().await.get(slot).cloned()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, slot: &str) -> Result<Option<String>, SnapshotError> {
        if self.inner.fail_loads.load(Ordering::SeqCst) {
            return Err(SnapshotError::Unavailable("load refused".to_string()));
        }
        Ok(self.inner.slots.lock().await.get(slot).cloned())
    }

    async fn save(&self, slot: &str, payload: &str) -> Result<(), SnapshotError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(SnapshotError::Unavailable("save refused".to_string()));
        }
        self.inner
            .slots
            .lock()
            .await
            .insert(slot.to_string(), payload.to_string());
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelmart_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_memory_store_shares_slots_between_clones() {
        let store = MemorySnapshotStore::new();
        let handle = store.clone();

        store.save("cart", "[]").await.unwrap();

        assert_eq!(handle.payload("cart").await.as_deref(), Some("[]"));
        assert_eq!(handle.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_failure_injection() {
        let store = MemorySnapshotStore::with_slot("cart", "[]");

        store.fail_loads(true);
        assert!(store.load("cart").await.is_err());

        store.fail_saves(true);
        assert!(store.save("cart", "[1]").await.is_err());
        assert_eq!(store.payload("cart").await.as_deref(), Some("[]"));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_repository_as_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.snapshots();

        assert_eq!(SnapshotStore::load(&store, "cart").await.unwrap(), None);
        SnapshotStore::save(&store, "cart", "[]").await.unwrap();
        assert_eq!(
            SnapshotStore::load(&store, "cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_closed_repository_reports_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.snapshots();
        db.close().await;

        assert!(matches!(
            SnapshotStore::save(&store, "cart", "[]").await,
            Err(SnapshotError::Db(_))
        ));
    }
}
