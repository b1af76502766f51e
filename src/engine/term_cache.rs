// ============================================================================
// Taylor Term Cache Builder
// Precomputes series coefficients and proves convergence at both boundaries
// ============================================================================

use super::errors::{ArithmeticError, Boundary, CalculatorError, ConvergenceError};
use crate::numeric::{DecimalFactory, DecimalOps};

/// Builds the Maclaurin coefficients of `(1+x)^(1/root)`, the generalized
/// binomial coefficients `C(1/root, n)`, by an iterative recurrence.
///
/// The recurrence keeps a derivative accumulator and a factorial accumulator
/// instead of re-exponentiating per term, which also lets it estimate the
/// truncation error incrementally. Alongside the coefficients it accumulates
/// the running powers of both convergence boundaries and tracks the error a
/// term contributes at each boundary:
///
/// - a boundary error that grows between consecutive terms fails the build
///   (the configured radius is not convergent for this root/precision);
/// - once both boundary errors are at or below `max_error`, the cache is
///   complete and every rate inside the interval is guaranteed to converge
///   within it;
/// - if `max_terms` iterations pass without that happening, the build fails
///   with the diagnostics and partial cache attached.
pub(crate) fn build_term_cache<D: DecimalOps>(
    root: &D,
    convergence_radius: &D,
    max_terms: u32,
    max_error: &D,
    precision: u32,
    new_from_int: DecimalFactory<D>,
) -> Result<Vec<D>, CalculatorError<D>> {
    let zero = new_from_int(0).map_err(|e| ArithmeticError::new("creating '0' decimal", e))?;
    let one = new_from_int(1).map_err(|e| ArithmeticError::new("creating '1' decimal", e))?;

    let upper_boundary = convergence_radius.clone();
    let lower_boundary = zero
        .checked_sub(convergence_radius)
        .map_err(|e| ArithmeticError::new("computing the lower convergence boundary", e))?;

    let places = precision + 1;

    let mut terms: Vec<D> = Vec::new();

    // Loop-local accumulators; nothing here survives past the final cache.
    let mut derivative_acc = one.clone();
    let mut factorial_acc = one.clone();
    let mut lower_pow = one.clone();
    let mut upper_pow = one.clone();
    let mut last_lower_error = zero.clone();
    let mut last_upper_error = zero;

    for n in 1..=max_terms {
        let n_decimal = new_from_int(u64::from(n))
            .map_err(|e| ArithmeticError::new("creating the iteration counter decimal", e))?;

        factorial_acc = factorial_acc
            .checked_mul(&n_decimal)
            .map_err(|e| ArithmeticError::new("advancing the factorial accumulator", e))?;

        derivative_acc = derivative_acc
            .div_round(root, places)
            .map_err(|e| ArithmeticError::new("dividing the derivative accumulator by the root", e))?;

        // derivative_acc * (1 - n*root), consumed on the next iteration
        let n_times_root = n_decimal
            .checked_mul(root)
            .map_err(|e| ArithmeticError::new("multiplying the iteration counter by the root", e))?;
        let falling_factor = one
            .checked_sub(&n_times_root)
            .map_err(|e| ArithmeticError::new("computing 1 - n*root", e))?;
        let next_derivative_acc = derivative_acc
            .checked_mul(&falling_factor)
            .map_err(|e| ArithmeticError::new("advancing the derivative accumulator", e))?;

        // derivative_acc / n!
        let term = derivative_acc
            .div_round(&factorial_acc, places)
            .map_err(|e| ArithmeticError::new("dividing the derivative by the factorial", e))?;
        let term = term
            .truncate(places)
            .map_err(|e| ArithmeticError::new("truncating the taylor term", e))?;

        terms.push(term.clone());
        derivative_acc = next_derivative_acc;

        // Error contributed by this term at the lower boundary.
        lower_pow = lower_pow
            .checked_mul(&lower_boundary)
            .map_err(|e| ArithmeticError::new("accumulating the lower boundary power", e))?;
        let lower_error = term
            .checked_mul(&lower_pow)
            .map_err(|e| ArithmeticError::new("computing the lower boundary error", e))?
            .abs()
            .map_err(|e| ArithmeticError::new("taking the lower boundary error magnitude", e))?;

        // The first term has no predecessor to compare against.
        if n > 1 {
            let converging = lower_error
                .less_than_or_equal(&last_lower_error)
                .map_err(|e| ArithmeticError::new("comparing lower boundary errors", e))?;
            if !converging {
                return Err(ConvergenceError::BoundaryDiverging {
                    boundary: Boundary::Lower,
                    term: n as usize,
                    error: lower_error,
                    previous_error: last_lower_error,
                }
                .into());
            }
        }
        last_lower_error = lower_error;

        // Error contributed by this term at the upper boundary.
        upper_pow = upper_pow
            .checked_mul(&upper_boundary)
            .map_err(|e| ArithmeticError::new("accumulating the upper boundary power", e))?;
        let upper_error = term
            .checked_mul(&upper_pow)
            .map_err(|e| ArithmeticError::new("computing the upper boundary error", e))?
            .abs()
            .map_err(|e| ArithmeticError::new("taking the upper boundary error magnitude", e))?;

        if n > 1 {
            let converging = upper_error
                .less_than_or_equal(&last_upper_error)
                .map_err(|e| ArithmeticError::new("comparing upper boundary errors", e))?;
            if !converging {
                return Err(ConvergenceError::BoundaryDiverging {
                    boundary: Boundary::Upper,
                    term: n as usize,
                    error: upper_error,
                    previous_error: last_upper_error,
                }
                .into());
            }
        }
        last_upper_error = upper_error;

        if n == 1 {
            continue;
        }

        let lower_done = last_lower_error
            .less_than_or_equal(max_error)
            .map_err(|e| ArithmeticError::new("checking the lower boundary error threshold", e))?;
        let upper_done = last_upper_error
            .less_than_or_equal(max_error)
            .map_err(|e| ArithmeticError::new("checking the upper boundary error threshold", e))?;

        if lower_done && upper_done {
            tracing::debug!(
                terms = terms.len(),
                precision,
                "taylor term cache converged at both boundaries"
            );
            return Ok(terms);
        }
    }

    Err(ConvergenceError::TermLimitExhausted {
        precision,
        iterations: max_terms,
        lower_error: last_lower_error,
        upper_error: last_upper_error,
        partial_terms: terms,
    }
    .into())
}
