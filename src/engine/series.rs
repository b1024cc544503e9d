// ============================================================================
// Series Accumulation
// Shared accumulate / test-convergence loop for the series algorithms
// ============================================================================

use crate::domain::WorkingContext;
use crate::numeric::{NumericError, NumericResult, ScaledDecimal};

/// Running sum of a series, rounded to the working precision after every fold
#[derive(Debug, Clone)]
pub struct SeriesAccumulator {
    sum: ScaledDecimal,
    terms: u64,
    precision: u64,
}

impl SeriesAccumulator {
    pub fn new(ctx: &WorkingContext) -> Self {
        Self {
            sum: ScaledDecimal::zero(),
            terms: 0,
            precision: ctx.precision(),
        }
    }

    /// Fold one term into the running sum
    pub fn fold(&mut self, term: &ScaledDecimal) {
        self.sum = self.sum.add_rounded(term, self.precision);
        self.terms += 1;
    }

    /// Number of terms folded so far
    pub fn terms(&self) -> u64 {
        self.terms
    }

    pub fn sum(&self) -> &ScaledDecimal {
        &self.sum
    }

    pub fn into_sum(self) -> ScaledDecimal {
        self.sum
    }
}

/// Sum `term_at(0), term_at(1), ...` until the context's convergence policy
/// fires or the term cap is reached.
///
/// # Errors
/// `ConvergenceFailure` once `ctx.term_cap()` terms were folded without the
/// policy firing; any error produced by `term_at`.
pub fn sum_until_converged<F>(
    ctx: &WorkingContext,
    mut term_at: F,
) -> NumericResult<SeriesAccumulator>
where
    F: FnMut(u64) -> NumericResult<ScaledDecimal>,
{
    let mut accumulator = SeriesAccumulator::new(ctx);
    let cap = ctx.term_cap();

    for index in 0..cap {
        let term = term_at(index)?;
        accumulator.fold(&term);
        if ctx.should_stop(index, &term) {
            tracing::trace!(terms = accumulator.terms(), "series converged");
            return Ok(accumulator);
        }
    }

    tracing::warn!(cap, target = ctx.target_digits(), "series did not converge");
    Err(NumericError::ConvergenceFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_context;

    #[test]
    fn test_geometric_series() {
        // sum of 2^-k = 2
        let ctx = make_context(10, 10).unwrap();
        let half = ScaledDecimal::new(5, 1);
        let acc = sum_until_converged(&ctx, |k| half.checked_pow(k as i64, ctx.precision()))
            .unwrap();
        assert_eq!(ctx.finalize(acc.sum()), ScaledDecimal::from_integer(2).round_to_scale(10));
        assert!(acc.terms() > 40);
    }

    #[test]
    fn test_divergent_series_fails() {
        let ctx = make_context(5, 5).unwrap();
        let result = sum_until_converged(&ctx, |_| Ok(ScaledDecimal::one()));
        assert_eq!(result.unwrap_err(), NumericError::ConvergenceFailure);
    }

    #[test]
    fn test_term_errors_propagate() {
        let ctx = make_context(5, 5).unwrap();
        let result = sum_until_converged(&ctx, |_| {
            ScaledDecimal::one().checked_div(&ScaledDecimal::zero(), 10)
        });
        assert_eq!(result.unwrap_err(), NumericError::DivisionByZero);
    }

    #[test]
    fn test_first_term_never_stops_summation() {
        let ctx = make_context(5, 5).unwrap();
        let acc = sum_until_converged(&ctx, |_| Ok(ScaledDecimal::zero())).unwrap();
        assert_eq!(acc.terms(), 2);
    }
}
