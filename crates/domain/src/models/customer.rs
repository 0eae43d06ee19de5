//! Customer (membership) domain models.
//!
//! A customer record is one person's enrollment in one commerce's program.
//! It is created on enrollment and mutated only by the accrual engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Customer membership in one commerce's loyalty program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Customer {
    pub id: Uuid,
    pub commerce_id: Uuid,
    pub name: String,
    /// WhatsApp outreach target.
    pub phone: String,
    /// Human-typable code embedded in the customer's QR.
    pub scan_code: String,
    pub total_points: i64,
    /// Stars toward the current goal. Resets on redemption.
    pub current_stars: i32,
    /// Lifetime stars earned. Never decremented.
    pub total_stars: i32,
    pub discount_available: bool,
    pub discount_expires_at: Option<DateTime<Utc>>,
    pub last_discount_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Create a membership from a validated enrollment request, with a
    /// freshly generated scan code and zeroed balances.
    pub fn enroll(commerce_id: Uuid, req: EnrollCustomerRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            commerce_id,
            name: req.name,
            phone: req.phone,
            scan_code: generate_scan_code(),
            total_points: 0,
            current_stars: 0,
            total_stars: 0,
            discount_available: false,
            discount_expires_at: None,
            last_discount_used_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the customer holds a coupon that has not expired at `now`.
    pub fn has_live_coupon(&self, now: DateTime<Utc>) -> bool {
        self.discount_available
            && self.discount_expires_at.is_some_and(|expires| expires > now)
    }
}

/// Request to enroll a customer into a commerce's program.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct EnrollCustomerRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,
}

/// Generate a random scan code in XXX-XXX-XXX format.
pub fn generate_scan_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789"; // Avoiding confusing chars: 0, O, I, 1

    let mut generate_segment = || -> String {
        (0..3)
            .map(|_| {
                let idx = rng.gen_range(0..chars.len());
                chars[idx] as char
            })
            .collect()
    };

    format!(
        "{}-{}-{}",
        generate_segment(),
        generate_segment(),
        generate_segment()
    )
}
