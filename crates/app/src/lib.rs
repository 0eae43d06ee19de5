//! Application facade for the loyalty backend.
//!
//! Wires the record store and the domain engines into the request/response
//! operations the (external) UI calls: enrollment, purchase recording,
//! reminder candidates, outreach logging, stats, and plan usage. Also owns
//! configuration loading and telemetry initialization.

pub mod app;
pub mod config;
pub mod error;
pub mod telemetry;

pub use app::{LoyaltyApp, PurchaseReceipt, RecordPurchaseRequest};
pub use config::Config;
pub use error::AppError;
