//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    /// International phone number: optional leading +, 8 to 15 digits.
    pub static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9]{8,15}$").unwrap();
}

/// Validates that a purchase amount is a usable number (finite, non-negative).
///
/// A zero amount is accepted: standalone redemptions are recorded as
/// zero-amount purchases.
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_invalid");
        err.message = Some("Amount must be a non-negative number".into());
        Err(err)
    }
}

/// Validates that a percentage is within 0 to 100.
pub fn validate_percent(percent: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&percent) {
        Ok(())
    } else {
        let mut err = ValidationError::new("percent_range");
        err.message = Some("Percentage must be between 0 and 100".into());
        Err(err)
    }
}

/// Validates a customer phone number usable as a WhatsApp outreach target.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message =
            Some("Phone must be 8-15 digits with an optional leading +".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount_accepts_zero_and_positive() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(150.75).is_ok());
    }

    #[test]
    fn test_validate_amount_rejects_negative() {
        assert!(validate_amount(-1.0).is_err());
    }

    #[test]
    fn test_validate_amount_rejects_non_finite() {
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert!(validate_amount(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_percent_bounds() {
        assert!(validate_percent(0.0).is_ok());
        assert!(validate_percent(100.0).is_ok());
        assert!(validate_percent(-0.1).is_err());
        assert!(validate_percent(100.1).is_err());
    }

    #[test]
    fn test_validate_phone_formats() {
        assert!(validate_phone("+5491123456789").is_ok());
        assert!(validate_phone("1123456789").is_ok());
        assert!(validate_phone("12345").is_err()); // too short
        assert!(validate_phone("+54 11 2345 6789").is_err()); // spaces
        assert!(validate_phone("phone").is_err());
    }
}
