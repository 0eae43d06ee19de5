//! Commerce repository.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use domain::models::{Commerce, ProgramConfig};

use crate::metrics::OpTimer;
use crate::store::{Store, StoreError};

/// Repository for commerce (tenant) rows.
#[derive(Clone)]
pub struct CommerceRepository {
    store: Store,
}

impl CommerceRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn insert(&self, commerce: Commerce) -> Result<(), StoreError> {
        let timer = OpTimer::new("commerces.insert");
        let result = self.store.insert(commerce);
        timer.record();
        result
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Commerce> {
        self.store.get_by_id(id)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<Commerce> {
        self.store
            .filter::<Commerce>(|c| c.slug == slug)
            .into_iter()
            .next()
    }

    /// Swap the program configuration, bumping `updated_at`.
    pub fn update_program(
        &self,
        id: Uuid,
        program: ProgramConfig,
        now: DateTime<Utc>,
    ) -> Result<Commerce, StoreError> {
        self.store.update::<Commerce>(id, |commerce| {
            commerce.program = program;
            commerce.updated_at = now;
        })
    }

    /// Delete a commerce and everything it owns: customers, transactions,
    /// rewards, outreach log, and usage counters.
    pub fn delete_cascade(&self, id: Uuid) -> Result<(), StoreError> {
        let timer = OpTimer::new("commerces.delete_cascade");
        let removed = self.store.with_tables_mut(|tables| {
            let before = tables.commerces.len();
            tables.commerces.retain(|c| c.id != id);
            if tables.commerces.len() == before {
                return false;
            }
            tables.customers.retain(|c| c.commerce_id != id);
            tables.transactions.retain(|t| t.commerce_id != id);
            tables.rewards.retain(|r| r.commerce_id != id);
            tables.reminder_logs.retain(|e| e.commerce_id != id);
            tables.scan_usage.retain(|u| u.commerce_id != id);
            true
        });
        timer.record();
        if !removed {
            return Err(StoreError::NotFound {
                table: "commerces",
                id,
            });
        }
        info!(commerce_id = %id, "commerce deleted with owned records");
        Ok(())
    }
}
