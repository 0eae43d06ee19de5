//! Transaction domain model.
//!
//! Transactions are append-only: one immutable record per purchase event,
//! and the sole source of truth for activity history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::commerce::PointsMode;

/// How the purchase was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMethod {
    /// Staff scanned the customer's QR.
    Scan,
    /// Staff keyed the purchase in by hand.
    Manual,
}

impl FromStr for ScanMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(ScanMethod::Scan),
            "manual" => Ok(ScanMethod::Manual),
            _ => Err(format!("Unknown scan method: {}", s)),
        }
    }
}

impl std::fmt::Display for ScanMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMethod::Scan => write!(f, "scan"),
            ScanMethod::Manual => write!(f, "manual"),
        }
    }
}

/// Immutable record of one purchase event.
///
/// `points_mode` / `points_value` capture the configuration in effect when
/// the purchase was recorded, so history stays auditable after the commerce
/// reconfigures its program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub id: Uuid,
    pub commerce_id: Uuid,
    pub customer_id: Uuid,
    pub staff_id: Uuid,
    pub amount: f64,
    pub points_granted: i64,
    pub star_granted: bool,
    pub coupon_generated: bool,
    /// Discount percent applied to this purchase, when the customer's
    /// coupon was used.
    pub discount_applied: Option<f64>,
    pub redeemed_reward_id: Option<Uuid>,
    pub points_mode: Option<PointsMode>,
    pub points_value: Option<f64>,
    pub method: ScanMethod,
    pub created_at: DateTime<Utc>,
}
