// ============================================================================
// Machin-like Arctangent Formula
// pi = 16·arctan(1/5) − 4·arctan(1/239)
// ============================================================================

use super::series::sum_until_converged;
use crate::domain::{AlgorithmType, WorkingContext};
use crate::interfaces::PiAlgorithm;
use crate::numeric::{NumericError, NumericResult, ScaledDecimal};

/// Machin's 1706 formula, each arctangent summed as an alternating Taylor
/// series under the shared convergence policy.
///
/// # Example
/// ```
/// use pi_engine::prelude::*;
///
/// let pi = MachinPi::new().compute_pi(10).unwrap();
/// assert_eq!(pi.to_string(), "3.1415926536");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MachinPi;

impl MachinPi {
    pub fn new() -> Self {
        Self
    }
}

/// The `n`-th term of the arctangent Taylor series: `(−1)^n · x^(2n+1) / (2n+1)`
pub fn arctan_term(x: &ScaledDecimal, n: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let exponent = 2 * n + 1;
    let power = x.checked_pow(exponent as i64, precision)?;
    let magnitude = power.checked_div(&ScaledDecimal::from(exponent), precision)?;
    Ok(if n % 2 == 0 { magnitude } else { -magnitude })
}

/// `arctan(x)` for `|x| < 1`, rounded to the context's working precision
/// (not yet to the target scale).
///
/// # Errors
/// `InvalidArgument` for `|x| >= 1`, where the series converges too slowly
/// or not at all.
pub fn arctan(x: &ScaledDecimal, ctx: &WorkingContext) -> NumericResult<ScaledDecimal> {
    if x.abs() >= ScaledDecimal::one() {
        return Err(NumericError::InvalidArgument);
    }
    let precision = ctx.precision();
    let accumulator = sum_until_converged(ctx, |n| arctan_term(x, n, precision))?;
    tracing::trace!(x = %x, terms = accumulator.terms(), "arctan summed");
    Ok(accumulator.into_sum())
}

impl PiAlgorithm for MachinPi {
    fn compute_with_context(&self, ctx: &WorkingContext) -> NumericResult<ScaledDecimal> {
        let precision = ctx.precision();
        let one = ScaledDecimal::one();

        let fifth = one.checked_div(&ScaledDecimal::from_integer(5), precision)?;
        let inverse_239 = one.checked_div(&ScaledDecimal::from_integer(239), precision)?;

        let atan_fifth = arctan(&fifth, ctx)?;
        let atan_239 = arctan(&inverse_239, ctx)?;

        let pi = ScaledDecimal::from_integer(16)
            .mul_rounded(&atan_fifth, precision)
            .sub_rounded(
                &ScaledDecimal::from_integer(4).mul_rounded(&atan_239, precision),
                precision,
            );

        tracing::debug!(target_digits = ctx.target_digits(), precision, "machin complete");
        Ok(ctx.finalize(&pi))
    }

    fn kind(&self) -> AlgorithmType {
        AlgorithmType::Machin
    }

    fn name(&self) -> &str {
        "Machin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_context;

    fn dec(s: &str) -> ScaledDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_arctan_terms_alternate_in_sign() {
        let x = dec("0.2");
        assert_eq!(arctan_term(&x, 0, 20).unwrap(), dec("0.2"));
        assert_eq!(
            arctan_term(&x, 1, 20).unwrap(),
            dec("-0.008").checked_div(&dec("3"), 20).unwrap()
        );
        assert_eq!(arctan_term(&x, 2, 20).unwrap(), dec("0.000064"));
        assert!(arctan_term(&x, 3, 20).unwrap().is_negative());
    }

    #[test]
    fn test_arctan_term_magnitudes_decrease() {
        let x = dec("0.2");
        let mut previous = arctan_term(&x, 0, 20).unwrap().abs();
        for n in 1..10 {
            let current = arctan_term(&x, n, 20).unwrap().abs();
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn test_arctan_known_value() {
        // arctan(0.5) = 0.46364760900080611621...
        let ctx = make_context(18, 10).unwrap();
        let value = arctan(&dec("0.5"), &ctx).unwrap();
        assert_eq!(ctx.finalize(&value), dec("0.463647609000806116"));
    }

    #[test]
    fn test_arctan_rejects_out_of_range() {
        let ctx = make_context(10, 10).unwrap();
        assert_eq!(arctan(&dec("1"), &ctx), Err(NumericError::InvalidArgument));
        assert_eq!(arctan(&dec("-1.5"), &ctx), Err(NumericError::InvalidArgument));
    }

    #[test]
    fn test_machin_ten_digits() {
        let pi = MachinPi::new().compute_pi(10).unwrap();
        assert_eq!(pi, dec("3.1415926536"));
        assert_eq!(pi.scale(), 10);
    }

    #[test]
    fn test_machin_rejects_non_positive_target() {
        assert_eq!(MachinPi::new().compute_pi(0), Err(NumericError::InvalidArgument));
        assert_eq!(MachinPi::new().compute_pi(-3), Err(NumericError::InvalidArgument));
    }
}
