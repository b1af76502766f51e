// ============================================================================
// Calculator
// Immutable aggregate of precision, error threshold and term cache
// ============================================================================

use super::errors::{ArithmeticError, CalculatorError};
use super::max_error::compute_max_error;
use super::term_cache::build_term_cache;
use crate::domain::{CalculatorConfig, ConfigError};
use crate::numeric::DecimalOps;

/// Calculator for `(1+x)^(1/root) - 1` over a caller-supplied decimal type.
///
/// Construction precomputes the Taylor coefficient cache and proves
/// convergence at both ends of the configured interval, so every
/// [`compute_rate`](Calculator::compute_rate) call inside that interval is
/// guaranteed to converge. Construction is the only expensive operation;
/// build one calculator and reuse it for many evaluations.
///
/// The calculator is immutable after construction and holds no interior
/// mutability, so sharing it across threads needs no locking.
///
/// # Example
/// ```ignore
/// let config = CalculatorConfig::new(252, 10, radius, fixed::new_from_int);
/// let calc = Calculator::new(config)?;
/// let daily = calc.compute_rate(annual_rate)?;
/// ```
#[derive(Debug)]
pub struct Calculator<D: DecimalOps> {
    /// Number of fractional digits results are truncated to.
    pub(crate) precision: u32,
    /// Half-ULP threshold: terms at or below it are negligible.
    pub(crate) max_error: D,
    /// Precomputed series coefficients, never mutated after construction.
    pub(crate) taylor_terms: Vec<D>,
    pub(crate) zero: D,
    pub(crate) one: D,
    /// `0 - convergence_radius`; rates must lie strictly above it.
    pub(crate) lower_boundary: D,
    /// `convergence_radius`; rates may equal it.
    pub(crate) upper_boundary: D,
}

impl<D: DecimalOps> Calculator<D> {
    /// Build a calculator from a validated configuration.
    ///
    /// # Errors
    /// The first failure encountered, in validation order:
    /// [`ConfigError`](crate::domain::ConfigError) for rejected parameters,
    /// an [`ArithmeticError`](super::errors::ArithmeticError) from the
    /// backend, or a [`ConvergenceError`](super::errors::ConvergenceError)
    /// when the radius cannot be proven convergent within the term ceiling.
    pub fn new(config: CalculatorConfig<D>) -> Result<Self, CalculatorError<D>> {
        config.validate()?;
        let config = config.normalized();

        let Some(new_from_int) = config.new_from_int else {
            return Err(ConfigError::MissingFactory.into());
        };

        let zero = new_from_int(0).map_err(|e| ArithmeticError::new("creating '0' decimal", e))?;

        // The single impure step of validation: the radius sign check needs
        // a zero of the backend type.
        let radius_not_positive = config
            .convergence_radius
            .less_than_or_equal(&zero)
            .map_err(|e| ArithmeticError::new("comparing the convergence radius to zero", e))?;
        if radius_not_positive {
            return Err(ConfigError::ConvergenceRadiusNotPositive {
                radius: config.convergence_radius.to_string(),
            }
            .into());
        }

        let root = new_from_int(u64::from(config.root))
            .map_err(|e| ArithmeticError::new("creating the root decimal", e))?;

        let max_error = compute_max_error(config.precision, new_from_int)?;

        let taylor_terms = build_term_cache(
            &root,
            &config.convergence_radius,
            config.max_terms_cache,
            &max_error,
            config.precision,
            new_from_int,
        )?;

        let one = new_from_int(1).map_err(|e| ArithmeticError::new("creating '1' decimal", e))?;

        let upper_boundary = config.convergence_radius;
        let lower_boundary = zero
            .checked_sub(&upper_boundary)
            .map_err(|e| ArithmeticError::new("computing the lower convergence boundary", e))?;

        tracing::debug!(
            root = config.root,
            precision = config.precision,
            terms = taylor_terms.len(),
            "rate calculator built"
        );

        Ok(Self {
            precision: config.precision,
            max_error,
            taylor_terms,
            zero,
            one,
            lower_boundary,
            upper_boundary,
        })
    }

    /// Number of Taylor terms held in the cache, for diagnostics and tuning.
    pub fn terms_cache_len(&self) -> usize {
        self.taylor_terms.len()
    }

    /// The configured precision, in fractional digits.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The half-ULP error threshold derived from the precision.
    pub fn max_error(&self) -> &D {
        &self.max_error
    }

    /// The accepted rate interval as `(lower, upper)` boundary values.
    ///
    /// The interval itself is `(lower, upper]`: exclusive below, inclusive
    /// above.
    pub fn convergence_boundaries(&self) -> (&D, &D) {
        (&self.lower_boundary, &self.upper_boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::ConvergenceError;
    use super::*;
    use crate::numeric::{arbitrary, fixed, NumericError};
    use bigdecimal::BigDecimal;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn big(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn arbitrary_config(root: u32, precision: u32, radius: &str) -> CalculatorConfig<BigDecimal> {
        CalculatorConfig::new(root, precision, big(radius), arbitrary::new_from_int)
    }

    #[test]
    fn test_cache_length_radius_nine_tenths() {
        let calc = Calculator::new(arbitrary_config(252, 30, "0.9")).unwrap();
        assert_eq!(calc.terms_cache_len(), 550);
    }

    #[test]
    fn test_cache_length_radius_eight_tenths() {
        let calc = Calculator::new(arbitrary_config(252, 30, "0.8")).unwrap();
        assert_eq!(calc.terms_cache_len(), 263);
    }

    #[test]
    fn test_lower_precision_needs_fewer_terms() {
        let calc = Calculator::new(arbitrary_config(252, 10, "0.9")).unwrap();
        assert_eq!(calc.terms_cache_len(), 127);
        assert_eq!(calc.precision(), 10);
    }

    #[test]
    fn test_boundaries_mirror_the_radius() {
        let calc = Calculator::new(arbitrary_config(252, 10, "0.9")).unwrap();
        let (lower, upper) = calc.convergence_boundaries();
        assert_eq!(lower, &big("-0.9"));
        assert_eq!(upper, &big("0.9"));
    }

    #[test]
    fn test_max_error_is_half_ulp() {
        let calc = Calculator::new(arbitrary_config(252, 10, "0.9")).unwrap();
        assert_eq!(calc.max_error(), &big("0.00000000005"));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let result = Calculator::new(arbitrary_config(252, 10, "-0.1"));
        assert!(matches!(
            result,
            Err(CalculatorError::Config(
                ConfigError::ConvergenceRadiusNotPositive { .. }
            ))
        ));
    }

    #[test]
    fn test_zero_radius_rejected() {
        let result = Calculator::new(arbitrary_config(252, 10, "0"));
        assert!(matches!(
            result,
            Err(CalculatorError::Config(
                ConfigError::ConvergenceRadiusNotPositive { .. }
            ))
        ));
    }

    #[test]
    fn test_root_one_rejected() {
        let result = Calculator::new(arbitrary_config(1, 10, "0.9"));
        assert!(matches!(
            result,
            Err(CalculatorError::Config(ConfigError::RootTooSmall {
                root: 1
            }))
        ));
    }

    #[test]
    fn test_small_ceiling_fails_construction() {
        let config = arbitrary_config(252, 30, "0.9").with_max_terms_cache(100);
        let result = Calculator::new(config);
        assert!(matches!(
            result,
            Err(CalculatorError::Convergence(
                ConvergenceError::TermLimitExhausted { iterations: 100, .. }
            ))
        ));
    }

    #[test]
    fn test_fixed_backend_handles_monthly_root() {
        let config = CalculatorConfig::new(12, 9, Decimal::new(5, 1), fixed::new_from_int);
        let calc = Calculator::new(config).unwrap();
        assert_eq!(calc.terms_cache_len(), 23);
    }

    #[test]
    fn test_fixed_backend_overflows_on_long_series() {
        // 127 terms are needed here; the factorial accumulator exceeds the
        // 96-bit mantissa long before that.
        let config = CalculatorConfig::new(252, 10, Decimal::new(9, 1), fixed::new_from_int);
        let result = Calculator::new(config);
        assert!(matches!(
            result,
            Err(CalculatorError::Arithmetic(ArithmeticError {
                source: NumericError::Overflow,
                ..
            }))
        ));
    }

    #[test]
    fn test_fixed_backend_rejects_excess_precision() {
        let config = CalculatorConfig::new(252, 30, Decimal::new(9, 1), fixed::new_from_int);
        let result = Calculator::new(config);
        assert!(matches!(
            result,
            Err(CalculatorError::Arithmetic(ArithmeticError {
                source: NumericError::Overflow | NumericError::ScaleExceeded,
                ..
            }))
        ));
    }

    #[test]
    fn test_calculator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Calculator<Decimal>>();
        assert_send_sync::<Calculator<BigDecimal>>();
    }
}
