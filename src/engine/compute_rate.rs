// ============================================================================
// Rate Evaluator
// Bounded series summation with error-driven early stop
// ============================================================================

use super::calculator::Calculator;
use super::errors::{ArithmeticError, Boundary, ComputeRateError, ConvergenceError, RangeError};
use crate::numeric::DecimalOps;

impl<D: DecimalOps> Calculator<D> {
    /// Computes `(1+rate)^(1/root) - 1` by summing the cached Taylor series.
    ///
    /// The rate must fall inside `(lower_boundary, upper_boundary]`, the
    /// interval proven convergent at construction time. Powers of the rate
    /// are accumulated incrementally; the summation stops as soon as a
    /// term's magnitude drops to the half-ULP threshold, and the result is
    /// truncated (not rounded) to the configured precision.
    ///
    /// Pure and read-only: calling it twice with the same rate returns the
    /// same value.
    ///
    /// # Errors
    /// [`RangeError`] when the rate is outside the interval. A
    /// [`ConvergenceError`] for a rate inside the interval would mean the
    /// construction-time proof was violated; it is surfaced rather than
    /// assumed impossible.
    pub fn compute_rate(&self, rate: D) -> Result<D, ComputeRateError<D>> {
        self.validate_boundaries(&rate)?;

        let mut result = self.zero.clone();
        let mut last_error = self.zero.clone();
        let mut power_acc = self.one.clone();

        for term in &self.taylor_terms {
            // power_acc is rate^n
            power_acc = power_acc
                .checked_mul(&rate)
                .map_err(|e| ArithmeticError::new("accumulating the rate power", e))?;

            let term_value = term
                .checked_mul(&power_acc)
                .map_err(|e| ArithmeticError::new("computing the current taylor term", e))?;

            let abs_error = term_value
                .abs()
                .map_err(|e| ArithmeticError::new("taking the term magnitude", e))?;

            let should_stop = abs_error
                .less_than_or_equal(&self.max_error)
                .map_err(|e| ArithmeticError::new("checking the term against the threshold", e))?;
            last_error = abs_error;

            result = result
                .checked_add(&term_value)
                .map_err(|e| ArithmeticError::new("adding the term to the result", e))?;

            if should_stop {
                return result
                    .truncate(self.precision)
                    .map_err(|e| ArithmeticError::new("truncating the final result", e).into());
            }
        }

        // The cache was proven sufficient for the whole interval at
        // construction time, so landing here means that proof was violated
        // for this rate.
        Err(ConvergenceError::RateNotConverged {
            precision: self.precision,
            rate,
            iterations: self.taylor_terms.len(),
            last_error,
            partial_result: result,
        }
        .into())
    }

    fn validate_boundaries(&self, rate: &D) -> Result<(), ComputeRateError<D>> {
        // Strictly excluded at the lower end.
        let at_or_below_lower = rate
            .less_than_or_equal(&self.lower_boundary)
            .map_err(|e| ArithmeticError::new("comparing the rate to the lower boundary", e))?;
        if at_or_below_lower {
            return Err(RangeError {
                boundary: Boundary::Lower,
                limit: self.lower_boundary.clone(),
                rate: rate.clone(),
            }
            .into());
        }

        // Included at the upper end.
        let within_upper = rate
            .less_than_or_equal(&self.upper_boundary)
            .map_err(|e| ArithmeticError::new("comparing the rate to the upper boundary", e))?;
        if !within_upper {
            return Err(RangeError {
                boundary: Boundary::Upper,
                limit: self.upper_boundary.clone(),
                rate: rate.clone(),
            }
            .into());
        }

        Ok(())
    }
}
