// ============================================================================
// Rate Calculator Library
// Taylor-series engine for converting compound rates between periods
// ============================================================================

//! # ratecalc
//!
//! Computes `(1+x)^(1/root) - 1` to a caller-specified decimal precision
//! using a truncated Taylor series expansion around `x = 0`, evaluated with
//! an arbitrary/fixed precision decimal backend supplied by the caller.
//!
//! Typical use: converting a compounding rate over one period (say, an
//! annual interest rate) into the equivalent rate over `1/root` of that
//! period, without floating-point rounding error.
//!
//! ## Features
//!
//! - **Construction-time convergence proof**: the Taylor coefficient cache
//!   is validated at both ends of the configured interval before the first
//!   evaluation, so every in-range call is guaranteed to converge
//! - **Error-driven early stop**: summation halts as soon as a term falls
//!   below the half-ULP threshold for the requested precision
//! - **Pluggable decimal backends** behind the [`DecimalOps`](numeric::DecimalOps)
//!   trait; adapters for `rust_decimal` and `bigdecimal` are bundled
//! - **Immutable, lock-free sharing**: a built calculator only ever reads
//!   its state
//!
//! ## Example
//!
//! ```rust
//! use ratecalc::prelude::*;
//! use rust_decimal::Decimal;
//!
//! // 10% annual compounding, converted to the equivalent monthly rate
//! // at 9 decimal places, proven convergent for rates in (-0.5, 0.5].
//! let config = CalculatorConfig::new(12, 9, Decimal::new(5, 1), fixed::new_from_int);
//! let calc = Calculator::new(config).unwrap();
//!
//! let monthly = calc.compute_rate(Decimal::new(1, 1)).unwrap();
//! let expected: Decimal = "0.00797414".parse().unwrap();
//! assert_eq!(monthly, expected);
//! assert_eq!(calc.terms_cache_len(), 23);
//! ```

pub mod domain;
pub mod engine;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{CalculatorConfig, ConfigError, DEFAULT_MAX_TERMS_CACHE, MIN_ROOT};
    pub use crate::engine::{
        ArithmeticError, Boundary, Calculator, CalculatorError, ComputeRateError,
        ConvergenceError, RangeError,
    };
    pub use crate::numeric::{
        arbitrary, fixed, DecimalFactory, DecimalOps, NumericError, NumericResult,
    };
}
