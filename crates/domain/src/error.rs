//! Domain error taxonomy.
//!
//! Expected domain conditions are returned as typed errors; they are never
//! panics and the core never formats user-facing text for them.

use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the loyalty engines.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Purchase amount missing, non-numeric, or negative. Rejected before
    /// any state is touched.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Referenced customer id not found.
    #[error("Unknown customer: {0}")]
    UnknownCustomer(Uuid),

    /// Referenced commerce id not found.
    #[error("Unknown commerce: {0}")]
    UnknownCommerce(Uuid),

    /// Redemption attempted for a reward type not enabled on the commerce,
    /// a threshold not yet met, a foreign reward, or an unavailable coupon.
    #[error("Reward mismatch: {0}")]
    RewardMismatch(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Non-fatal data-integrity condition detected during accrual.
///
/// The affected balance is clamped to zero and the purchase is still
/// recorded; callers receive the warning on the outcome and a `warn!` event
/// is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// Points balance would have gone negative and was clamped to zero.
    NegativePointsClamped,
    /// Star count would have gone negative and was clamped to zero.
    NegativeStarsClamped,
}

impl std::fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityWarning::NegativePointsClamped => {
                write!(f, "negative points balance clamped to zero")
            }
            IntegrityWarning::NegativeStarsClamped => {
                write!(f, "negative star count clamped to zero")
            }
        }
    }
}
