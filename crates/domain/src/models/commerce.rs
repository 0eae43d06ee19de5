//! Commerce (merchant tenant) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Plan types available for commerces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Starter,
    Business,
}

impl PlanType {
    /// Monthly scan allowance for this plan. Enforcement of the limit is
    /// the caller's responsibility; the backend only counts.
    pub fn monthly_scan_limit(&self) -> i64 {
        match self {
            PlanType::Free => 100,
            PlanType::Starter => 1_000,
            PlanType::Business => i64::MAX, // Unlimited
        }
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PlanType::Free),
            "starter" => Ok(PlanType::Starter),
            "business" => Ok(PlanType::Business),
            _ => Err(format!("Unknown plan type: {}", s)),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanType::Free => write!(f, "free"),
            PlanType::Starter => write!(f, "starter"),
            PlanType::Business => write!(f, "business"),
        }
    }
}

/// Points accrual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointsMode {
    /// Points are a percentage of the purchase amount.
    Percentage,
    /// A fixed number of points per transaction, regardless of amount.
    Fixed,
}

impl std::fmt::Display for PointsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointsMode::Percentage => write!(f, "percentage"),
            PointsMode::Fixed => write!(f, "fixed"),
        }
    }
}

/// Commerce-configured rules for the loyalty mechanisms.
///
/// Any subset of mechanisms may be enabled. At most one of points/stars is
/// "primary" per business rule enforced in the UI, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ProgramConfig {
    pub enable_points: bool,
    pub points_mode: PointsMode,
    /// Percentage rate or fixed points per transaction, depending on mode.
    #[validate(range(min = 0.0, message = "Points value must be non-negative"))]
    pub points_value: f64,

    pub enable_stars: bool,
    /// Target star count unlocking the stars reward.
    #[validate(range(min = 1, message = "Stars goal must be at least 1"))]
    pub stars_goal: i32,

    pub enable_coupon: bool,
    #[validate(custom(function = "shared::validation::validate_percent"))]
    pub discount_percent: f64,
    #[validate(range(
        min = 1,
        max = 365,
        message = "Coupon validity must be 1-365 days"
    ))]
    pub discount_validity_days: i64,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            enable_points: false,
            points_mode: PointsMode::Percentage,
            points_value: 0.0,
            enable_stars: false,
            stars_goal: 10,
            enable_coupon: false,
            discount_percent: 10.0,
            discount_validity_days: 7,
        }
    }
}

/// Commerce domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Commerce {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub phone: Option<String>,
    pub plan_type: PlanType,
    pub program: ProgramConfig,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Commerce {
    /// Create a commerce from a validated registration request. The program
    /// starts with every mechanism disabled until configured.
    pub fn register(req: RegisterCommerceRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: req.name,
            slug: req.slug,
            phone: req.phone,
            plan_type: req.plan_type,
            program: ProgramConfig::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to register a new commerce.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterCommerceRequest {
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: String,
    #[validate(length(min = 3, max = 50, message = "Slug must be 3-50 characters"))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: Option<String>,
    #[serde(default = "default_plan_type")]
    pub plan_type: PlanType,
}

fn default_plan_type() -> PlanType {
    PlanType::Free
}

// Regex for slug validation
lazy_static::lazy_static! {
    pub static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap();
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_slug");
        err.message = Some(
            "Slug may only contain lowercase letters, digits, and inner hyphens".into(),
        );
        Err(err)
    }
}
