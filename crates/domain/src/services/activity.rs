//! Customer activity summarizer.
//!
//! Derives a per-customer visit summary from the transaction log. O(n) per
//! call over the supplied slice; results are recomputed per query, not
//! cached.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Transaction;

/// How many transactions the recent-activity display shows.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 10;

/// Visit summary for one customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivitySummary {
    pub last_visit_at: Option<DateTime<Utc>>,
    pub total_visits: usize,
    pub total_amount: f64,
    /// Most recent first, at most [`RECENT_TRANSACTIONS_LIMIT`].
    pub recent_transactions: Vec<Transaction>,
}

/// Summarize a customer's visit history from the transaction log.
pub fn summarize(customer_id: Uuid, transactions: &[Transaction]) -> ActivitySummary {
    let mut own: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.customer_id == customer_id)
        .cloned()
        .collect();
    own.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let last_visit_at = own.first().map(|t| t.created_at);
    let total_visits = own.len();
    let total_amount = own.iter().map(|t| t.amount).sum();
    let recent_transactions = own.into_iter().take(RECENT_TRANSACTIONS_LIMIT).collect();

    ActivitySummary {
        last_visit_at,
        total_visits,
        total_amount,
        recent_transactions,
    }
}
