//! Outreach log repository.

use uuid::Uuid;

use domain::models::{ReminderLogEntry, ReminderStatus};

use crate::metrics::OpTimer;
use crate::store::{Store, StoreError};

/// Repository for the append-only outreach audit log.
#[derive(Clone)]
pub struct ReminderLogRepository {
    store: Store,
}

impl ReminderLogRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn append(&self, entry: ReminderLogEntry) -> Result<(), StoreError> {
        let timer = OpTimer::new("reminder_logs.append");
        let result = self.store.insert(entry);
        timer.record();
        result
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<ReminderLogEntry> {
        self.store.get_by_id(id)
    }

    /// Finalize an opened entry as sent or skipped.
    pub fn set_status(
        &self,
        id: Uuid,
        status: ReminderStatus,
    ) -> Result<ReminderLogEntry, StoreError> {
        self.store
            .update::<ReminderLogEntry>(id, |entry| entry.status = status)
    }

    pub fn list_by_commerce(&self, commerce_id: Uuid) -> Vec<ReminderLogEntry> {
        self.store
            .filter(|e: &ReminderLogEntry| e.commerce_id == commerce_id)
    }
}
