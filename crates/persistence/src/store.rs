//! The record store: typed collections over a fixed schema.
//!
//! The source of truth is an in-memory [`Tables`] value behind a cloneable
//! handle, optionally loaded from and flushed to a JSON snapshot file.
//! Each operation applies as a single atomic write from the caller's
//! perspective; no multi-table atomicity is assumed across calls.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use domain::models::{
    Commerce, Customer, ReminderLogEntry, Reward, ScanUsage, Transaction,
};

/// Store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{table} not found: {id}")]
    NotFound { table: &'static str, id: Uuid },

    #[error("{table} already contains id {id}")]
    Duplicate { table: &'static str, id: Uuid },

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// The fixed schema: every collection the backend persists.
///
/// `#[serde(default)]` keeps old snapshots loadable when a collection is
/// added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub commerces: Vec<Commerce>,
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    pub rewards: Vec<Reward>,
    pub reminder_logs: Vec<ReminderLogEntry>,
    pub scan_usage: Vec<ScanUsage>,
}

/// A row type bound to its slot in the fixed schema.
pub trait Record: Clone {
    const TABLE: &'static str;

    fn id(&self) -> Uuid;
    fn table(tables: &Tables) -> &Vec<Self>
    where
        Self: Sized;
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self>
    where
        Self: Sized;
}

impl Record for Commerce {
    const TABLE: &'static str = "commerces";

    fn id(&self) -> Uuid {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.commerces
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.commerces
    }
}

impl Record for Customer {
    const TABLE: &'static str = "customers";

    fn id(&self) -> Uuid {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.customers
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.customers
    }
}

impl Record for Transaction {
    const TABLE: &'static str = "transactions";

    fn id(&self) -> Uuid {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.transactions
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.transactions
    }
}

impl Record for Reward {
    const TABLE: &'static str = "rewards";

    fn id(&self) -> Uuid {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.rewards
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.rewards
    }
}

impl Record for ReminderLogEntry {
    const TABLE: &'static str = "reminder_logs";

    fn id(&self) -> Uuid {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.reminder_logs
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.reminder_logs
    }
}

impl Record for ScanUsage {
    const TABLE: &'static str = "scan_usage";

    fn id(&self) -> Uuid {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.scan_usage
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.scan_usage
    }
}

struct StoreInner {
    tables: Tables,
    path: Option<PathBuf>,
}

/// Cloneable handle to the record store. Repositories hold a clone each,
/// the way connection pools are shared.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Store {
    /// An empty store with no backing file. Used in tests and ephemeral
    /// setups; `flush` is a no-op.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                tables: Tables::default(),
                path: None,
            })),
        }
    }

    /// Open a store backed by a JSON snapshot file. A missing file yields
    /// an empty store that will be created on first flush.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            info!(path = %path.display(), "snapshot not found, starting empty");
            Tables::default()
        };
        Ok(Self {
            inner: Arc::new(RwLock::new(StoreInner {
                tables,
                path: Some(path),
            })),
        })
    }

    /// Serialize the tables back to the snapshot file, if any.
    pub fn flush(&self) -> Result<(), StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        let Some(path) = inner.path.as_ref() else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(&inner.tables)?;
        fs::write(path, raw)?;
        debug!(path = %path.display(), "snapshot flushed");
        Ok(())
    }

    /// All rows of a table, cloned out as a snapshot.
    pub fn get_all<T: Record>(&self) -> Vec<T> {
        let inner = self.inner.read().expect("store lock poisoned");
        T::table(&inner.tables).clone()
    }

    pub fn get_by_id<T: Record>(&self, id: Uuid) -> Option<T> {
        let inner = self.inner.read().expect("store lock poisoned");
        T::table(&inner.tables).iter().find(|r| r.id() == id).cloned()
    }

    /// Rows matching a predicate, cloned out as a snapshot.
    pub fn filter<T: Record>(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let inner = self.inner.read().expect("store lock poisoned");
        T::table(&inner.tables)
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub fn insert<T: Record>(&self, row: T) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let table = T::table_mut(&mut inner.tables);
        if table.iter().any(|r| r.id() == row.id()) {
            return Err(StoreError::Duplicate {
                table: T::TABLE,
                id: row.id(),
            });
        }
        table.push(row);
        Ok(())
    }

    /// Apply a patch to one row and return the patched copy.
    pub fn update<T: Record>(
        &self,
        id: Uuid,
        patch: impl FnOnce(&mut T),
    ) -> Result<T, StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let table = T::table_mut(&mut inner.tables);
        let row = table
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound {
                table: T::TABLE,
                id,
            })?;
        patch(row);
        Ok(row.clone())
    }

    pub fn delete<T: Record>(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let table = T::table_mut(&mut inner.tables);
        let before = table.len();
        table.retain(|r| r.id() != id);
        if table.len() == before {
            return Err(StoreError::NotFound {
                table: T::TABLE,
                id,
            });
        }
        Ok(())
    }

    /// Multi-table mutation under one lock hold. Reserved for repository
    /// internals (cascade deletes, counter upserts).
    pub(crate) fn with_tables_mut<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut inner = self.inner.write().expect("store lock poisoned");
        f(&mut inner.tables)
    }
}
