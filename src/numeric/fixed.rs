// ============================================================================
// Fixed-Precision Backend
// DecimalOps adapter over rust_decimal's 96-bit decimal
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::ops::DecimalOps;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale a `rust_decimal::Decimal` can carry.
///
/// Requests beyond this are rejected instead of silently computing at a
/// coarser scale, so a configuration the backend cannot honor fails loudly
/// at construction time.
const MAX_PLACES: u32 = 28;

/// Integer-to-decimal factory for the fixed-precision backend.
pub fn new_from_int(n: u64) -> NumericResult<Decimal> {
    Ok(Decimal::from(n))
}

/// `DecimalOps` over `rust_decimal::Decimal`.
///
/// Fast and allocation-free, but bounded: 96-bit mantissa, at most 28
/// fractional digits. Suited to modest precision targets and short term
/// caches; the factorial accumulator of the cache builder overflows the
/// mantissa once a series needs more than 27 terms. Use the arbitrary
/// precision backend beyond that.
impl DecimalOps for Decimal {
    type Error = NumericError;

    #[inline]
    fn checked_add(&self, other: &Self) -> NumericResult<Self> {
        Decimal::checked_add(*self, *other).ok_or_else(|| {
            if other.is_sign_positive() {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    #[inline]
    fn checked_sub(&self, other: &Self) -> NumericResult<Self> {
        Decimal::checked_sub(*self, *other).ok_or_else(|| {
            if other.is_sign_negative() {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    #[inline]
    fn checked_mul(&self, other: &Self) -> NumericResult<Self> {
        Decimal::checked_mul(*self, *other).ok_or(NumericError::Overflow)
    }

    fn div_round(&self, divisor: &Self, places: u32) -> NumericResult<Self> {
        if places > MAX_PLACES {
            return Err(NumericError::ScaleExceeded);
        }

        let quotient = Decimal::checked_div(*self, *divisor).ok_or({
            if divisor.is_zero() {
                NumericError::DivisionByZero
            } else {
                NumericError::Overflow
            }
        })?;

        Ok(quotient.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
    }

    fn truncate(&self, places: u32) -> NumericResult<Self> {
        if places > MAX_PLACES {
            return Err(NumericError::ScaleExceeded);
        }

        Ok(self.trunc_with_scale(places))
    }

    #[inline]
    fn abs(&self) -> NumericResult<Self> {
        Ok(Decimal::abs(self))
    }

    fn pow_int(&self, exponent: u32) -> NumericResult<Self> {
        let mut acc = Decimal::ONE;
        for _ in 0..exponent {
            acc = Decimal::checked_mul(acc, *self).ok_or(NumericError::Overflow)?;
        }

        Ok(acc)
    }

    #[inline]
    fn less_than_or_equal(&self, other: &Self) -> NumericResult<bool> {
        Ok(self <= other)
    }
}
