// ============================================================================
// Arbitrary-Precision Backend
// DecimalOps adapter over bigdecimal's unbounded decimal
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::ops::DecimalOps;
use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};

/// Integer-to-decimal factory for the arbitrary-precision backend.
pub fn new_from_int(n: u64) -> NumericResult<BigDecimal> {
    Ok(BigDecimal::from(n))
}

/// `DecimalOps` over `bigdecimal::BigDecimal`.
///
/// Addition, subtraction and multiplication are exact at any magnitude;
/// `div_round` rounds the mathematically exact quotient, computed on integer
/// mantissas, half away from zero at the requested place. Use this backend
/// when the precision target exceeds what a fixed-width mantissa can carry.
impl DecimalOps for BigDecimal {
    type Error = NumericError;

    #[inline]
    fn checked_add(&self, other: &Self) -> NumericResult<Self> {
        Ok(self + other)
    }

    #[inline]
    fn checked_sub(&self, other: &Self) -> NumericResult<Self> {
        Ok(self - other)
    }

    #[inline]
    fn checked_mul(&self, other: &Self) -> NumericResult<Self> {
        Ok(self * other)
    }

    fn div_round(&self, divisor: &Self, places: u32) -> NumericResult<Self> {
        let (divisor_int, divisor_scale) = divisor.as_bigint_and_exponent();
        let (divisor_sign, divisor_mag) = divisor_int.into_parts();
        if divisor_mag == BigUint::from(0u32) {
            return Err(NumericError::DivisionByZero);
        }

        let (numerator_int, numerator_scale) = self.as_bigint_and_exponent();
        let (numerator_sign, numerator_mag) = numerator_int.into_parts();

        // Align the exact quotient to `places` fractional digits before the
        // integer division, shifting whichever side the scales demand.
        let shift = i64::from(places) - numerator_scale + divisor_scale;
        let (mut num, mut den) = (numerator_mag, divisor_mag);
        if shift >= 0 {
            let exp = u32::try_from(shift).map_err(|_| NumericError::Overflow)?;
            num *= BigUint::from(10u32).pow(exp);
        } else {
            let exp = u32::try_from(-shift).map_err(|_| NumericError::Overflow)?;
            den *= BigUint::from(10u32).pow(exp);
        }

        let mut quotient = &num / &den;
        let remainder = &num % &den;
        if &remainder * 2u32 >= den {
            quotient += 1u32;
        }

        let negative = (numerator_sign == Sign::Minus) != (divisor_sign == Sign::Minus);
        let sign = if negative { Sign::Minus } else { Sign::Plus };

        Ok(BigDecimal::new(
            BigInt::from_biguint(sign, quotient),
            i64::from(places),
        ))
    }

    #[inline]
    fn truncate(&self, places: u32) -> NumericResult<Self> {
        Ok(self.with_scale_round(i64::from(places), RoundingMode::Down))
    }

    #[inline]
    fn abs(&self) -> NumericResult<Self> {
        Ok(BigDecimal::abs(self))
    }

    fn pow_int(&self, exponent: u32) -> NumericResult<Self> {
        let mut acc = BigDecimal::from(1u64);
        for _ in 0..exponent {
            acc = &acc * self;
        }

        Ok(acc)
    }

    #[inline]
    fn less_than_or_equal(&self, other: &Self) -> NumericResult<bool> {
        Ok(self <= other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn big(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_from_int() {
        assert_eq!(new_from_int(0).unwrap(), big("0"));
        assert_eq!(new_from_int(30_000).unwrap(), big("30000"));
    }

    #[test]
    fn test_div_round_half_away_from_zero() {
        // exact tie: 1/8 = 0.125
        assert_eq!(DecimalOps::div_round(&big("1"), &big("8"), 2).unwrap(), big("0.13"));
        assert_eq!(DecimalOps::div_round(&big("-1"), &big("8"), 2).unwrap(), big("-0.13"));
        assert_eq!(DecimalOps::div_round(&big("1"), &big("-8"), 2).unwrap(), big("-0.13"));

        // repeating quotient
        assert_eq!(
            DecimalOps::div_round(&big("1"), &big("3"), 10).unwrap(),
            big("0.3333333333")
        );
        assert_eq!(
            DecimalOps::div_round(&big("2"), &big("3"), 10).unwrap(),
            big("0.6666666667")
        );
    }

    #[test]
    fn test_div_round_mixed_scales() {
        // 0.625 / 0.5 = 1.25 regardless of operand scales
        assert_eq!(
            DecimalOps::div_round(&big("0.625"), &big("0.5"), 2).unwrap(),
            big("1.25")
        );
        // quotient larger than one with a shift toward the denominator
        assert_eq!(
            DecimalOps::div_round(&big("1000"), &big("0.003"), 4).unwrap(),
            big("333333.3333")
        );
    }

    #[test]
    fn test_div_by_zero() {
        let result = DecimalOps::div_round(&big("1"), &big("0"), 2);
        assert_eq!(result, Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_truncate_drops_digits() {
        assert_eq!(DecimalOps::truncate(&big("0.99999"), 4).unwrap(), big("0.9999"));
        assert_eq!(DecimalOps::truncate(&big("-0.99999"), 4).unwrap(), big("-0.9999"));
        assert_eq!(DecimalOps::truncate(&big("1.5"), 9).unwrap(), big("1.5"));
    }

    #[test]
    fn test_pow_int_is_exact() {
        assert_eq!(DecimalOps::pow_int(&big("1.5"), 3).unwrap(), big("3.375"));
        assert_eq!(DecimalOps::pow_int(&big("2"), 0).unwrap(), big("1"));

        // no precision ceiling
        let huge = DecimalOps::pow_int(&big("10"), 40).unwrap();
        assert_eq!(huge, big("10000000000000000000000000000000000000000"));
    }

    #[test]
    fn test_exact_ring_ops() {
        let a = big("0.123456789123456789");
        let b = big("0.000000000000000001");
        assert_eq!(
            DecimalOps::checked_add(&a, &b).unwrap(),
            big("0.123456789123456790")
        );
        assert_eq!(
            DecimalOps::checked_mul(&big("0.9"), &big("0.9")).unwrap(),
            big("0.81")
        );
    }

    #[test]
    fn test_less_than_or_equal_normalizes_scale() {
        assert!(DecimalOps::less_than_or_equal(&big("0.10"), &big("0.1")).unwrap());
        assert!(!DecimalOps::less_than_or_equal(&big("0.11"), &big("0.1")).unwrap());
    }
}
