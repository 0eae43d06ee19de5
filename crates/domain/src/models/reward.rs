//! Reward domain models.
//!
//! A reward is a named threshold (points or stars) unlocking a customer
//! benefit. The engines read rewards; they never own or mutate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Which mechanism a reward's threshold applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Points,
    Stars,
}

impl FromStr for RewardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "points" => Ok(RewardKind::Points),
            "stars" => Ok(RewardKind::Stars),
            _ => Err(format!("Unknown reward kind: {}", s)),
        }
    }
}

impl std::fmt::Display for RewardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewardKind::Points => write!(f, "points"),
            RewardKind::Stars => write!(f, "stars"),
        }
    }
}

/// Reward threshold definition scoped to one commerce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Reward {
    pub id: Uuid,
    pub commerce_id: Uuid,
    pub name: String,
    pub kind: RewardKind,
    /// Set when `kind` is points.
    pub points_threshold: Option<i64>,
    /// Set when `kind` is stars.
    pub stars_threshold: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Reward {
    /// Create a reward from a validated request.
    pub fn create(commerce_id: Uuid, req: CreateRewardRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            commerce_id,
            name: req.name,
            kind: req.kind,
            points_threshold: req.points_threshold,
            stars_threshold: req.stars_threshold,
            is_active: true,
            created_at: now,
        }
    }
}

/// Request to define a reward for a commerce.
///
/// The threshold matching `kind` must be present; that cross-field check
/// lives in the application layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateRewardRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    pub kind: RewardKind,
    #[validate(range(min = 1, message = "Points threshold must be at least 1"))]
    pub points_threshold: Option<i64>,
    #[validate(range(min = 1, message = "Stars threshold must be at least 1"))]
    pub stars_threshold: Option<i32>,
}
