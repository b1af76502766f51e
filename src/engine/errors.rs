// ============================================================================
// Engine Errors
// Construction-time and call-time failure taxonomy
// ============================================================================

use crate::domain::ConfigError;
use crate::numeric::DecimalOps;
use std::fmt;

// ============================================================================
// Boundary
// ============================================================================

/// One end of the convergence interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The negative end, `0 - convergence_radius`.
    Lower,
    /// The positive end, `convergence_radius`.
    Upper,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Lower => write!(f, "lower"),
            Boundary::Upper => write!(f, "upper"),
        }
    }
}

// ============================================================================
// Arithmetic Error Wrapper
// ============================================================================

/// A backend arithmetic failure, wrapped with the step it happened in.
///
/// Arithmetic failures are deterministic given their inputs, so the engine
/// never retries; the context string identifies the failing operation for
/// the caller.
#[derive(Debug, Clone)]
pub struct ArithmeticError<E> {
    /// Which engine step failed.
    pub context: String,
    /// The backend error.
    pub source: E,
}

impl<E> ArithmeticError<E> {
    pub(crate) fn new(context: impl Into<String>, source: E) -> Self {
        Self {
            context: context.into(),
            source,
        }
    }
}

impl<E: fmt::Display> fmt::Display for ArithmeticError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ArithmeticError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ============================================================================
// Range Error
// ============================================================================

/// A rate outside the accepted interval `(lower_boundary, upper_boundary]`.
#[derive(Debug, Clone)]
pub struct RangeError<D> {
    /// Which boundary was violated.
    pub boundary: Boundary,
    /// The value of that boundary.
    pub limit: D,
    /// The rejected rate.
    pub rate: D,
}

impl<D: fmt::Display> fmt::Display for RangeError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rate '{}' is outside the convergence boundaries: {} boundary is '{}'",
            self.rate, self.boundary, self.limit
        )
    }
}

impl<D: fmt::Debug + fmt::Display> std::error::Error for RangeError<D> {}

// ============================================================================
// Convergence Error
// ============================================================================

/// A series that could not be driven below the error threshold.
///
/// The construction-time variants are fatal configuration errors: the
/// requested radius/precision/root combination has no convergence proof.
/// The call-time variant should not occur for a rate inside the validated
/// interval, but is surfaced rather than assumed impossible.
#[derive(Debug, Clone)]
pub enum ConvergenceError<D> {
    /// A boundary error grew between consecutive terms during cache
    /// construction: the radius is not valid for this root/precision.
    BoundaryDiverging {
        /// The diverging boundary.
        boundary: Boundary,
        /// One-based index of the term where the growth was observed.
        term: usize,
        /// The boundary error at that term.
        error: D,
        /// The boundary error one term earlier.
        previous_error: D,
    },
    /// The term ceiling was exhausted before both boundary errors dropped
    /// below the threshold.
    TermLimitExhausted {
        /// Requested fractional digits.
        precision: u32,
        /// Number of iterations performed (the configured ceiling).
        iterations: u32,
        /// Last error observed at the lower boundary.
        lower_error: D,
        /// Last error observed at the upper boundary.
        upper_error: D,
        /// The coefficients computed before giving up.
        partial_terms: Vec<D>,
    },
    /// Evaluation consumed the whole term cache without meeting the
    /// threshold for this rate.
    RateNotConverged {
        /// Requested fractional digits.
        precision: u32,
        /// The rate being evaluated.
        rate: D,
        /// Number of terms consumed (the cache length).
        iterations: usize,
        /// Magnitude of the final term.
        last_error: D,
        /// The sum accumulated so far.
        partial_result: D,
    },
}

impl<D: fmt::Display> fmt::Display for ConvergenceError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceError::BoundaryDiverging {
                boundary,
                term,
                error,
                previous_error,
            } => write!(
                f,
                "{} convergence boundary is diverging at taylor term {}: error grew from '{}' to '{}'",
                boundary, term, previous_error, error
            ),
            ConvergenceError::TermLimitExhausted {
                precision,
                iterations,
                lower_error,
                upper_error,
                ..
            } => write!(
                f,
                "term cache ceiling of {} reached before both boundary errors fell below the {}-digit threshold: lower error '{}', upper error '{}'",
                iterations, precision, lower_error, upper_error
            ),
            ConvergenceError::RateNotConverged {
                precision,
                rate,
                iterations,
                last_error,
                partial_result,
            } => write!(
                f,
                "rate '{}' could not converge to {} digits of precision, it converged to '{}' with {} iterations, last approximation error was '{}'",
                rate, precision, partial_result, iterations, last_error
            ),
        }
    }
}

impl<D: fmt::Debug + fmt::Display> std::error::Error for ConvergenceError<D> {}

// ============================================================================
// Aggregates
// ============================================================================

/// Everything that can fail while building a [`Calculator`](crate::engine::Calculator).
#[derive(Debug)]
pub enum CalculatorError<D: DecimalOps> {
    /// Rejected configuration value.
    Config(ConfigError),
    /// Backend arithmetic failure, with the failing step.
    Arithmetic(ArithmeticError<D::Error>),
    /// No convergence proof within the term ceiling.
    Convergence(ConvergenceError<D>),
}

impl<D: DecimalOps> fmt::Display for CalculatorError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorError::Config(e) => write!(f, "validating config: {}", e),
            CalculatorError::Arithmetic(e) => write!(f, "{}", e),
            CalculatorError::Convergence(e) => write!(f, "computing taylor terms cache: {}", e),
        }
    }
}

impl<D: DecimalOps> std::error::Error for CalculatorError<D> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalculatorError::Config(e) => Some(e),
            CalculatorError::Arithmetic(e) => Some(&e.source),
            CalculatorError::Convergence(_) => None,
        }
    }
}

impl<D: DecimalOps> From<ConfigError> for CalculatorError<D> {
    fn from(e: ConfigError) -> Self {
        CalculatorError::Config(e)
    }
}

impl<D: DecimalOps> From<ArithmeticError<D::Error>> for CalculatorError<D> {
    fn from(e: ArithmeticError<D::Error>) -> Self {
        CalculatorError::Arithmetic(e)
    }
}

impl<D: DecimalOps> From<ConvergenceError<D>> for CalculatorError<D> {
    fn from(e: ConvergenceError<D>) -> Self {
        CalculatorError::Convergence(e)
    }
}

/// Everything that can fail while evaluating a rate.
#[derive(Debug)]
pub enum ComputeRateError<D: DecimalOps> {
    /// The rate is outside the validated convergence interval.
    OutOfRange(RangeError<D>),
    /// Backend arithmetic failure, with the failing step.
    Arithmetic(ArithmeticError<D::Error>),
    /// The proven cache was exhausted for this rate anyway.
    Convergence(ConvergenceError<D>),
}

impl<D: DecimalOps> fmt::Display for ComputeRateError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeRateError::OutOfRange(e) => write!(f, "validating boundaries: {}", e),
            ComputeRateError::Arithmetic(e) => write!(f, "{}", e),
            ComputeRateError::Convergence(e) => write!(f, "{}", e),
        }
    }
}

impl<D: DecimalOps> std::error::Error for ComputeRateError<D> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComputeRateError::OutOfRange(_) => None,
            ComputeRateError::Arithmetic(e) => Some(&e.source),
            ComputeRateError::Convergence(_) => None,
        }
    }
}

impl<D: DecimalOps> From<RangeError<D>> for ComputeRateError<D> {
    fn from(e: RangeError<D>) -> Self {
        ComputeRateError::OutOfRange(e)
    }
}

impl<D: DecimalOps> From<ArithmeticError<D::Error>> for ComputeRateError<D> {
    fn from(e: ArithmeticError<D::Error>) -> Self {
        ComputeRateError::Arithmetic(e)
    }
}

impl<D: DecimalOps> From<ConvergenceError<D>> for ComputeRateError<D> {
    fn from(e: ConvergenceError<D>) -> Self {
        ComputeRateError::Convergence(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;
    use rust_decimal::Decimal;

    #[test]
    fn test_boundary_display() {
        assert_eq!(Boundary::Lower.to_string(), "lower");
        assert_eq!(Boundary::Upper.to_string(), "upper");
    }

    #[test]
    fn test_range_error_display() {
        let err = RangeError {
            boundary: Boundary::Upper,
            limit: Decimal::new(9, 1),
            rate: Decimal::new(2, 0),
        };
        assert_eq!(
            err.to_string(),
            "rate '2' is outside the convergence boundaries: upper boundary is '0.9'"
        );
    }

    #[test]
    fn test_rate_not_converged_display() {
        let err: ConvergenceError<Decimal> = ConvergenceError::RateNotConverged {
            precision: 4,
            rate: Decimal::new(9, 1),
            iterations: 550,
            last_error: Decimal::new(2, 4),
            partial_result: Decimal::new(123, 5),
        };
        assert_eq!(
            err.to_string(),
            "rate '0.9' could not converge to 4 digits of precision, it converged to \
             '0.00123' with 550 iterations, last approximation error was '0.0002'"
        );
    }

    #[test]
    fn test_arithmetic_error_source() {
        use std::error::Error;

        let err: CalculatorError<Decimal> =
            ArithmeticError::new("doubling the precision scale", NumericError::Overflow).into();
        assert!(err.to_string().contains("doubling the precision scale"));
        assert!(err.source().is_some());
    }
}
