//! Shared utilities for the loyalty backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic (amounts, percentages, phone numbers)
//! - Calendar and time-window helpers

pub mod time;
pub mod validation;
