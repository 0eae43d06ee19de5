//! Outreach audit log.
//!
//! Append-only trail of reminder messages triggered from the dashboard.
//! Consumed for cool-down suppression and monthly stats, nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reminder::ReminderKind;

/// Lifecycle of one outreach attempt: `opened` when staff opens the chat
/// with the rendered message, then finalized as `sent` or `skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Opened,
    Sent,
    Skipped,
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderStatus::Opened => write!(f, "opened"),
            ReminderStatus::Sent => write!(f, "sent"),
            ReminderStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// One outreach audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReminderLogEntry {
    pub id: Uuid,
    pub commerce_id: Uuid,
    pub customer_id: Uuid,
    pub kind: ReminderKind,
    /// Rendered message text, kept verbatim for the audit trail.
    pub message: String,
    pub status: ReminderStatus,
    pub staff_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ReminderLogEntry {
    /// Record that staff opened an outreach chat for a customer.
    pub fn open(
        commerce_id: Uuid,
        customer_id: Uuid,
        kind: ReminderKind,
        message: impl Into<String>,
        staff_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            commerce_id,
            customer_id,
            kind,
            message: message.into(),
            status: ReminderStatus::Opened,
            staff_id,
            created_at: now,
        }
    }

    /// Whether this entry counts toward the contact cool-down window.
    /// Skipped outreach never suppresses a later reminder.
    pub fn suppresses(&self) -> bool {
        matches!(self.status, ReminderStatus::Opened | ReminderStatus::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: ReminderStatus) -> ReminderLogEntry {
        let mut e = ReminderLogEntry::open(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ReminderKind::Inactive,
            "Hola!",
            Uuid::new_v4(),
            Utc::now(),
        );
        e.status = status;
        e
    }

    #[test]
    fn test_open_starts_in_opened_status() {
        let e = entry(ReminderStatus::Opened);
        assert_eq!(e.status, ReminderStatus::Opened);
    }

    #[test]
    fn test_suppression_by_status() {
        assert!(entry(ReminderStatus::Opened).suppresses());
        assert!(entry(ReminderStatus::Sent).suppresses());
        assert!(!entry(ReminderStatus::Skipped).suppresses());
    }
}
