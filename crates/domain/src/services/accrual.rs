//! Accrual engine.
//!
//! Applies one purchase event to a customer's points/stars/coupon state
//! under the commerce's program configuration. Pure: the caller resolves
//! records, passes a snapshot, and persists the outcome.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult, IntegrityWarning};
use crate::models::{
    Customer, PointsMode, ProgramConfig, Reward, RewardKind, ScanMethod, Transaction,
};

/// One purchase event as handed to the engine.
#[derive(Debug, Clone)]
pub struct PurchaseInput<'a> {
    pub amount: f64,
    pub staff_id: Uuid,
    pub method: ScanMethod,
    /// Reward the customer is redeeming in this same operation, if any.
    pub redeem: Option<&'a Reward>,
    /// Whether the customer's existing coupon is applied to this purchase.
    pub apply_coupon: bool,
}

/// Result of applying a purchase: the mutated customer, the transaction to
/// append, and any non-fatal integrity warnings.
#[derive(Debug, Clone)]
pub struct AccrualOutcome {
    pub customer: Customer,
    pub transaction: Transaction,
    pub warnings: Vec<IntegrityWarning>,
}

/// Apply a purchase event to a customer under the commerce's program rules.
///
/// Each enabled mechanism is applied independently. All rejection checks run
/// before any state is computed, so a failed call leaves nothing to persist.
pub fn apply_purchase(
    customer: &Customer,
    program: &ProgramConfig,
    input: PurchaseInput<'_>,
    now: DateTime<Utc>,
) -> DomainResult<AccrualOutcome> {
    if !input.amount.is_finite() || input.amount < 0.0 {
        return Err(DomainError::InvalidAmount(format!("{}", input.amount)));
    }
    if let Some(reward) = input.redeem {
        validate_redemption(customer, program, reward)?;
    }
    if input.apply_coupon {
        if !program.enable_coupon {
            return Err(DomainError::RewardMismatch(
                "coupons are not enabled for this commerce".to_string(),
            ));
        }
        if !customer.has_live_coupon(now) {
            return Err(DomainError::RewardMismatch(
                "customer has no active coupon to apply".to_string(),
            ));
        }
    }

    let mut updated = customer.clone();
    let mut warnings = Vec::new();

    // Points
    let mut points_granted = 0;
    if program.enable_points {
        points_granted = points_delta(input.amount, program);
        let mut balance = updated.total_points + points_granted;
        if let Some(reward) = redeemed(input.redeem, RewardKind::Points) {
            balance -= reward.points_threshold.unwrap_or(0);
        }
        if balance < 0 {
            warn!(
                customer_id = %customer.id,
                balance,
                "negative points balance after redemption, clamping to zero"
            );
            warnings.push(IntegrityWarning::NegativePointsClamped);
            balance = 0;
        }
        updated.total_points = balance;
    }

    // Stars
    let mut star_granted = false;
    if program.enable_stars {
        if let Some(reward) = redeemed(input.redeem, RewardKind::Stars) {
            let mut remaining = updated.current_stars - reward.stars_threshold.unwrap_or(0);
            if remaining < 0 {
                warn!(
                    customer_id = %customer.id,
                    remaining,
                    "negative star count after redemption, clamping to zero"
                );
                warnings.push(IntegrityWarning::NegativeStarsClamped);
                remaining = 0;
            }
            updated.current_stars = remaining;
        } else {
            // Exactly one star per transaction, independent of amount. The
            // count may pass the goal until a redemption resets it.
            updated.current_stars += 1;
            updated.total_stars += 1;
            star_granted = true;
        }
    }

    // Coupon: usage and renewal are not mutually exclusive within one
    // operation, so the refresh runs even when the coupon was just applied.
    let mut coupon_generated = false;
    let mut discount_applied = None;
    if program.enable_coupon {
        if input.apply_coupon {
            discount_applied = Some(program.discount_percent);
            updated.last_discount_used_at = Some(now);
        }
        updated.discount_available = true;
        updated.discount_expires_at = Some(now + Duration::days(program.discount_validity_days));
        coupon_generated = true;
    }

    updated.updated_at = now;

    let transaction = Transaction {
        id: Uuid::new_v4(),
        commerce_id: customer.commerce_id,
        customer_id: customer.id,
        staff_id: input.staff_id,
        amount: input.amount,
        points_granted,
        star_granted,
        coupon_generated,
        discount_applied,
        redeemed_reward_id: input.redeem.map(|r| r.id),
        points_mode: program.enable_points.then_some(program.points_mode),
        points_value: program.enable_points.then_some(program.points_value),
        method: input.method,
        created_at: now,
    };

    Ok(AccrualOutcome {
        customer: updated,
        transaction,
        warnings,
    })
}

/// Points earned by this purchase. Floor is applied per transaction, never
/// on an aggregate.
fn points_delta(amount: f64, program: &ProgramConfig) -> i64 {
    match program.points_mode {
        PointsMode::Percentage => (amount * program.points_value / 100.0).floor() as i64,
        PointsMode::Fixed => program.points_value.floor() as i64,
    }
}

fn redeemed<'a>(redeem: Option<&'a Reward>, kind: RewardKind) -> Option<&'a Reward> {
    redeem.filter(|r| r.kind == kind)
}

/// Rejects redemptions the commerce configuration or the customer's balance
/// cannot honor. Thresholds are checked against the balance before this
/// purchase accrues.
fn validate_redemption(
    customer: &Customer,
    program: &ProgramConfig,
    reward: &Reward,
) -> DomainResult<()> {
    if reward.commerce_id != customer.commerce_id {
        return Err(DomainError::RewardMismatch(
            "reward belongs to a different commerce".to_string(),
        ));
    }
    if !reward.is_active {
        return Err(DomainError::RewardMismatch(
            "reward is no longer active".to_string(),
        ));
    }
    match reward.kind {
        RewardKind::Points => {
            if !program.enable_points {
                return Err(DomainError::RewardMismatch(
                    "points are not enabled for this commerce".to_string(),
                ));
            }
            let threshold = reward.points_threshold.ok_or_else(|| {
                DomainError::RewardMismatch("points reward has no threshold".to_string())
            })?;
            if customer.total_points < threshold {
                return Err(DomainError::RewardMismatch(format!(
                    "points threshold not met: {} < {}",
                    customer.total_points, threshold
                )));
            }
        }
        RewardKind::Stars => {
            if !program.enable_stars {
                return Err(DomainError::RewardMismatch(
                    "stars are not enabled for this commerce".to_string(),
                ));
            }
            let threshold = reward.stars_threshold.ok_or_else(|| {
                DomainError::RewardMismatch("stars reward has no threshold".to_string())
            })?;
            if customer.current_stars < threshold {
                return Err(DomainError::RewardMismatch(format!(
                    "stars threshold not met: {} < {}",
                    customer.current_stars, threshold
                )));
            }
        }
    }
    Ok(())
}
