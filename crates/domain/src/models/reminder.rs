//! Reminder candidate types.
//!
//! Candidates are engine output only: recomputed on every query, never
//! persisted. `reason` and `progress_text` are designed to feed the
//! (external) message renderer directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification assigned to an outreach candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Inactive,
    NearReward,
    CouponExpiring,
}

impl std::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderKind::Inactive => write!(f, "inactive"),
            ReminderKind::NearReward => write!(f, "near_reward"),
            ReminderKind::CouponExpiring => write!(f, "coupon_expiring"),
        }
    }
}

/// Outreach priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: HIGH before MEDIUM before LOW.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "HIGH"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::Low => write!(f, "LOW"),
        }
    }
}

/// A computed suggestion to contact one customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReminderCandidate {
    pub customer_id: Uuid,
    pub customer_name: String,
    /// WhatsApp target for the message renderer.
    pub phone: String,
    pub kind: ReminderKind,
    pub reason: String,
    pub priority: Priority,
    pub last_visit_at: Option<DateTime<Utc>>,
    /// Human-readable metric summary, e.g. "450 / 500 pts" or "Hace 22 días".
    pub progress_text: String,
}
