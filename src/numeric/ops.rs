// ============================================================================
// Decimal Capability Set
// Defines the contract every decimal backend must satisfy
// ============================================================================

use std::fmt;

/// Capability set for an arbitrary/fixed precision decimal type.
///
/// The calculator is generic over any type implementing this trait; it never
/// assumes infinite precision. Every operation that can lose precision takes
/// an explicit `places` argument and every operation is fallible, because
/// fixed-width backends can overflow or run out of scale.
///
/// `div_round` and `truncate` are distinct on purpose: rounding may adjust
/// the last kept digit in either direction, truncation always drops.
pub trait DecimalOps: Clone + fmt::Debug + fmt::Display + Sized {
    /// Backend-specific arithmetic failure (overflow, invalid rounding target, ...).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Adds two decimals.
    fn checked_add(&self, other: &Self) -> Result<Self, Self::Error>;

    /// Subtracts `other` from this decimal.
    fn checked_sub(&self, other: &Self) -> Result<Self, Self::Error>;

    /// Multiplies two decimals.
    fn checked_mul(&self, other: &Self) -> Result<Self, Self::Error>;

    /// Divides by `divisor` and rounds the quotient half away from zero to
    /// `places` fractional digits.
    fn div_round(&self, divisor: &Self, places: u32) -> Result<Self, Self::Error>;

    /// Drops every digit beyond `places` fractional digits, toward zero.
    fn truncate(&self, places: u32) -> Result<Self, Self::Error>;

    /// Absolute value.
    fn abs(&self) -> Result<Self, Self::Error>;

    /// Raises this decimal to a non-negative integer power.
    fn pow_int(&self, exponent: u32) -> Result<Self, Self::Error>;

    /// Returns true if this decimal is less than or equal to `other`.
    fn less_than_or_equal(&self, other: &Self) -> Result<bool, Self::Error>;
}

/// Integer-to-decimal factory injected through the configuration.
///
/// A plain function value rather than an ambient constructor, so the engine
/// never reaches for global state to mint constants.
#[allow(type_alias_bounds)]
pub type DecimalFactory<D: DecimalOps> = fn(u64) -> Result<D, D::Error>;
