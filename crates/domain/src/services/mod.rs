//! Domain services for the loyalty backend.
//!
//! Services are pure computations over domain models: they take a snapshot
//! of state plus a reference instant and return results, without touching
//! the store.

pub mod accrual;
pub mod activity;
pub mod reminder_stats;
pub mod reminders;

pub use accrual::{apply_purchase, AccrualOutcome, PurchaseInput};
pub use activity::{summarize, ActivitySummary, RECENT_TRANSACTIONS_LIMIT};
pub use reminder_stats::{stats, ReminderStats, RECOVERY_RATE_PERCENT};
pub use reminders::{
    candidates, classify, is_suppressed, rules, ClassifierInput, ReminderRule,
    SUPPRESSION_WINDOW_DAYS,
};
