//! Business-rule bounds for user-supplied bond parameters.
//!
//! The valuation engine trusts its caller and only rejects structurally
//! impossible input; these bounds belong to whatever surface accepts raw
//! input (CLI flags, a browser form) and run before pricing. Each violation
//! carries a human-readable message naming the offending field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::BondCalcError;
use crate::valuation::bond::BondParameters;
use crate::BondCalcResult;

/// Check the calculator's input bounds: coupon rate and YTM within 0–10%,
/// a whole 1–5 years to maturity, positive face value, and a standard
/// payment frequency.
pub fn validate_bounds(params: &BondParameters) -> BondCalcResult<()> {
    if params.face_value <= Decimal::ZERO {
        return Err(BondCalcError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if params.coupon_rate < dec!(0) || params.coupon_rate > dec!(10) {
        return Err(BondCalcError::InvalidInput {
            field: "coupon_rate".into(),
            reason: "Coupon rate must be between 0% and 10%".into(),
        });
    }
    if params.ytm < dec!(0) || params.ytm > dec!(10) {
        return Err(BondCalcError::InvalidInput {
            field: "ytm".into(),
            reason: "Yield to maturity must be between 0% and 10%".into(),
        });
    }
    if params.years < dec!(1) || params.years > dec!(5) {
        return Err(BondCalcError::InvalidInput {
            field: "years".into(),
            reason: "Years to maturity must be between 1 and 5".into(),
        });
    }
    if !params.years.fract().is_zero() {
        return Err(BondCalcError::InvalidInput {
            field: "years".into(),
            reason: "Years to maturity must be a whole number of years".into(),
        });
    }
    if !matches!(params.frequency, 1 | 2 | 4 | 12) {
        return Err(BondCalcError::InvalidInput {
            field: "frequency".into(),
            reason: "Payment frequency must be 1, 2, 4, or 12 coupons per year".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn in_bounds() -> BondParameters {
        BondParameters {
            face_value: dec!(100),
            coupon_rate: dec!(8.6),
            ytm: dec!(6.4),
            years: dec!(5),
            frequency: 2,
        }
    }

    #[test]
    fn test_accepts_in_bounds_parameters() {
        assert!(validate_bounds(&in_bounds()).is_ok());

        // Boundary values are valid
        let mut params = in_bounds();
        params.coupon_rate = dec!(0);
        params.ytm = dec!(10);
        params.years = dec!(1);
        params.frequency = 12;
        assert!(validate_bounds(&params).is_ok());
    }

    #[test]
    fn test_rejects_coupon_rate_out_of_bounds() {
        let mut params = in_bounds();
        params.coupon_rate = dec!(10.5);
        let err = validate_bounds(&params).unwrap_err();
        match err {
            BondCalcError::InvalidInput { field, reason } => {
                assert_eq!(field, "coupon_rate");
                assert!(reason.contains("between 0% and 10%"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_ytm() {
        let mut params = in_bounds();
        params.ytm = dec!(-0.5);
        match validate_bounds(&params).unwrap_err() {
            BondCalcError::InvalidInput { field, .. } => assert_eq!(field, "ytm"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_years_out_of_bounds() {
        let mut params = in_bounds();
        params.years = dec!(6);
        match validate_bounds(&params).unwrap_err() {
            BondCalcError::InvalidInput { field, .. } => assert_eq!(field, "years"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_fractional_years() {
        let mut params = in_bounds();
        params.years = dec!(2.5);
        match validate_bounds(&params).unwrap_err() {
            BondCalcError::InvalidInput { field, reason } => {
                assert_eq!(field, "years");
                assert!(reason.contains("whole number"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_nonstandard_frequency() {
        let mut params = in_bounds();
        params.frequency = 3;
        match validate_bounds(&params).unwrap_err() {
            BondCalcError::InvalidInput { field, .. } => assert_eq!(field, "frequency"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_nonpositive_face_value() {
        let mut params = in_bounds();
        params.face_value = dec!(-100);
        match validate_bounds(&params).unwrap_err() {
            BondCalcError::InvalidInput { field, .. } => assert_eq!(field, "face_value"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
