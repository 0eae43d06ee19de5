//! Reminder stats aggregator.
//!
//! Monthly outreach counters for the dashboard, computed from the outreach
//! log alone.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ReminderLogEntry, ReminderStatus};

/// Share of sent reminders assumed to bring the customer back. A documented
/// heuristic estimate, not a measured return rate.
pub const RECOVERY_RATE_PERCENT: i64 = 20;

/// Outreach counters for the current calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReminderStats {
    pub sent_this_month: i64,
    pub recovered_this_month: i64,
}

/// Count sent outreach for the calendar month of `now` (month + year
/// equality, not a rolling 30 days). `recovered_this_month` is
/// `floor(sent × 20%)`.
pub fn stats(log: &[ReminderLogEntry], now: DateTime<Utc>) -> ReminderStats {
    let sent_this_month = log
        .iter()
        .filter(|entry| entry.status == ReminderStatus::Sent)
        .filter(|entry| shared::time::same_calendar_month(entry.created_at, now))
        .count() as i64;

    ReminderStats {
        sent_this_month,
        recovered_this_month: sent_this_month * RECOVERY_RATE_PERCENT / 100,
    }
}
