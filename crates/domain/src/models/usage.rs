//! Plan usage models.
//!
//! The backend counts scans per commerce per calendar month; enforcing the
//! plan limit (blocking new scans) is the caller's responsibility.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Monthly scan counter row, one per commerce per period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanUsage {
    pub id: Uuid,
    pub commerce_id: Uuid,
    /// Calendar period key, e.g. "2026-08".
    pub period: String,
    pub count: i64,
}

/// Usage snapshot returned alongside purchase receipts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UsageSnapshot {
    pub count: i64,
    pub limit: i64,
    pub is_over_limit: bool,
}

impl UsageSnapshot {
    pub fn new(count: i64, limit: i64) -> Self {
        Self {
            count,
            limit,
            is_over_limit: count > limit,
        }
    }
}
