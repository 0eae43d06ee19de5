//! Repository implementations for store operations.

pub mod commerce;
pub mod customer;
pub mod reminder_log;
pub mod reward;
pub mod scan_usage;
pub mod transaction;

pub use commerce::CommerceRepository;
pub use customer::CustomerRepository;
pub use reminder_log::ReminderLogRepository;
pub use reward::RewardRepository;
pub use scan_usage::ScanUsageRepository;
pub use transaction::TransactionRepository;
