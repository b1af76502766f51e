// ============================================================================
// Max-Error Calculator
// Derives the half-ULP error threshold for a precision target
// ============================================================================

use super::errors::{ArithmeticError, CalculatorError};
use crate::numeric::{DecimalFactory, DecimalOps};

/// Computes `1 / (2 * 10^precision)`, the half unit-in-last-place bound.
///
/// Any Taylor term whose magnitude is at or below this threshold is
/// negligible at the requested precision. Computed once per calculator,
/// never recomputed.
pub(crate) fn compute_max_error<D: DecimalOps>(
    precision: u32,
    new_from_int: DecimalFactory<D>,
) -> Result<D, CalculatorError<D>> {
    let one = new_from_int(1).map_err(|e| ArithmeticError::new("creating '1' decimal", e))?;
    let two = new_from_int(2).map_err(|e| ArithmeticError::new("creating '2' decimal", e))?;
    let ten = new_from_int(10).map_err(|e| ArithmeticError::new("creating '10' decimal", e))?;

    let scale = ten
        .pow_int(precision)
        .map_err(|e| ArithmeticError::new("raising 10 to the power of the precision", e))?;

    let denominator = two
        .checked_mul(&scale)
        .map_err(|e| ArithmeticError::new("doubling the precision scale", e))?;

    let max_error = one
        .div_round(&denominator, precision + 1)
        .map_err(|e| ArithmeticError::new("inverting the half-ulp denominator", e))?;

    Ok(max_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{arbitrary, fixed, NumericError};
    use bigdecimal::BigDecimal;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_half_ulp_values() {
        let err = compute_max_error(0, arbitrary::new_from_int).unwrap();
        assert_eq!(err, BigDecimal::from_str("0.5").unwrap());

        let err = compute_max_error(2, arbitrary::new_from_int).unwrap();
        assert_eq!(err, BigDecimal::from_str("0.005").unwrap());

        let err = compute_max_error(30, arbitrary::new_from_int).unwrap();
        assert_eq!(
            err,
            BigDecimal::from_str("0.0000000000000000000000000000005").unwrap()
        );
    }

    #[test]
    fn test_half_ulp_on_fixed_backend() {
        let err = compute_max_error(9, fixed::new_from_int).unwrap();
        assert_eq!(err, Decimal::new(5, 10));
    }

    #[test]
    fn test_precision_beyond_fixed_backend_scale() {
        // 10^28 still fits the mantissa, but 29 rounding places do not.
        let result = compute_max_error(28, fixed::new_from_int);
        assert!(matches!(
            result,
            Err(CalculatorError::Arithmetic(ArithmeticError {
                source: NumericError::ScaleExceeded,
                ..
            }))
        ));
    }
}
