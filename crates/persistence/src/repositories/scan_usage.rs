//! Monthly scan usage repository.
//!
//! One counter row per commerce per calendar month. The backend only
//! counts; enforcing the plan limit is the caller's concern.

use chrono::{DateTime, Utc};
use metrics::counter;
use uuid::Uuid;

use domain::models::ScanUsage;
use shared::time::month_key;

use crate::store::Store;

/// Repository for per-commerce monthly scan counters.
#[derive(Clone)]
pub struct ScanUsageRepository {
    store: Store,
}

impl ScanUsageRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Bump the commerce's counter for the month of `now`, creating the
    /// period row on first scan. Returns the count after the increment.
    pub fn increment(&self, commerce_id: Uuid, now: DateTime<Utc>) -> i64 {
        let period = month_key(now);
        let count = self.store.with_tables_mut(|tables| {
            match tables
                .scan_usage
                .iter_mut()
                .find(|u| u.commerce_id == commerce_id && u.period == period)
            {
                Some(row) => {
                    row.count += 1;
                    row.count
                }
                None => {
                    tables.scan_usage.push(ScanUsage {
                        id: Uuid::new_v4(),
                        commerce_id,
                        period: period.clone(),
                        count: 1,
                    });
                    1
                }
            }
        });
        counter!("loyalty_scans_total").increment(1);
        count
    }

    /// The commerce's scan count for the month of `now`.
    pub fn current_count(&self, commerce_id: Uuid, now: DateTime<Utc>) -> i64 {
        let period = month_key(now);
        self.store
            .filter(|u: &ScanUsage| u.commerce_id == commerce_id && u.period == period)
            .into_iter()
            .map(|u| u.count)
            .next()
            .unwrap_or(0)
    }
}
