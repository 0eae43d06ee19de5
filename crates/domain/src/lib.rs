//! Domain layer for the loyalty backend.
//!
//! This crate contains:
//! - Domain models (Commerce, Customer, Transaction, Reward, reminder types)
//! - The loyalty engines (activity summary, accrual, reminder candidates,
//!   reminder stats)
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::{DomainError, DomainResult, IntegrityWarning};
