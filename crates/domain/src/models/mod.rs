//! Domain models for the loyalty backend.

pub mod commerce;
pub mod customer;
pub mod reminder;
pub mod reminder_log;
pub mod reward;
pub mod transaction;
pub mod usage;

pub use commerce::{Commerce, PlanType, PointsMode, ProgramConfig, RegisterCommerceRequest};
pub use customer::{Customer, EnrollCustomerRequest};
pub use reminder::{Priority, ReminderCandidate, ReminderKind};
pub use reminder_log::{ReminderLogEntry, ReminderStatus};
pub use reward::{CreateRewardRequest, Reward, RewardKind};
pub use transaction::{ScanMethod, Transaction};
pub use usage::{ScanUsage, UsageSnapshot};
