//! Salary amount helpers using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64` and pass through `Decimal`
//! for validation and rounding (2 decimal places, half-up).

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed base salary per contract
const MAX_SALARY: f64 = 10_000_000.0;

/// Validate a base salary and normalise it to 2 decimal places.
///
/// Rejects NaN/Infinity, negative amounts and amounts above [`MAX_SALARY`].
pub fn validate_salary(amount: f64) -> Result<f64, String> {
    if !amount.is_finite() {
        return Err(format!("base salary must be a finite number, got {amount}"));
    }
    if amount < 0.0 {
        return Err(format!("base salary must be non-negative, got {amount}"));
    }
    if amount > MAX_SALARY {
        return Err(format!(
            "base salary exceeds maximum allowed ({MAX_SALARY}), got {amount}"
        ));
    }

    let decimal = Decimal::from_f64(amount)
        .ok_or_else(|| format!("base salary is not representable: {amount}"))?;
    let rounded =
        decimal.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded
        .to_f64()
        .ok_or_else(|| format!("base salary is not representable: {amount}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_rounds_valid_salary() {
        assert_eq!(validate_salary(4250.0).unwrap(), 4250.0);
        assert_eq!(validate_salary(4250.005).unwrap(), 4250.01);
        assert_eq!(validate_salary(0.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(validate_salary(-1.0).is_err());
        assert!(validate_salary(f64::NAN).is_err());
        assert!(validate_salary(f64::INFINITY).is_err());
        assert!(validate_salary(MAX_SALARY * 2.0).is_err());
    }
}
