// ============================================================================
// Spigot Baseline
// Leibniz series and its Euler-accelerated form
// ============================================================================

use super::series::sum_until_converged;
use crate::domain::{AlgorithmType, WorkingContext};
use crate::interfaces::PiAlgorithm;
use crate::numeric::{factorial_unsigned, NumericError, NumericResult, ScaledDecimal};
use num_bigint::BigInt;

/// Deliberately slow comparison baseline.
///
/// Sums the Euler transform of the Leibniz series,
/// `pi = Σ 2^(k+1) (k!)² / (2k+1)!`, the series behind the Rabinowitz–Wagon
/// spigot. Each term is roughly half the previous one, so about 3.3 terms are
/// needed per decimal digit: far slower than every other strategy, but it
/// still reaches any requested precision. The untransformed Leibniz series,
/// which would need on the order of `10^d` terms for `d` digits, is exposed
/// through [`leibniz_partial_sum`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SpigotPi;

impl SpigotPi {
    pub fn new() -> Self {
        Self
    }
}

/// Term `k` of the accelerated series: `2^(k+1) (k!)² / (2k+1)!`
pub fn spigot_term(k: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let k_factorial = factorial_unsigned(k);
    let power_of_two = BigInt::from(1u8) << (k + 1) as usize;
    let numerator = power_of_two * &k_factorial * &k_factorial;
    let denominator = factorial_unsigned(2 * k + 1);

    ScaledDecimal::from_bigint(numerator)
        .checked_div(&ScaledDecimal::from_bigint(denominator), precision)
}

/// Term `n` of the plain Leibniz series for pi/4: `(−1)^n / (2n+1)`
pub fn leibniz_term(n: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let magnitude = ScaledDecimal::one().checked_div(&ScaledDecimal::from(2 * n + 1), precision)?;
    Ok(if n % 2 == 0 { magnitude } else { -magnitude })
}

/// `4 · Σ_{n<terms} (−1)^n / (2n+1)`: error is roughly `1/terms`.
pub fn leibniz_partial_sum(terms: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let quarter = (0..terms).try_fold(ScaledDecimal::zero(), |sum, n| {
        Ok::<_, NumericError>(sum.add_rounded(&leibniz_term(n, precision)?, precision))
    })?;
    Ok(ScaledDecimal::from_integer(4).mul_rounded(&quarter, precision))
}

impl PiAlgorithm for SpigotPi {
    fn compute_with_context(&self, ctx: &WorkingContext) -> NumericResult<ScaledDecimal> {
        let precision = ctx.precision();
        let accumulator = sum_until_converged(ctx, |k| spigot_term(k, precision))?;
        tracing::debug!(terms = accumulator.terms(), precision, "spigot complete");
        Ok(ctx.finalize(accumulator.sum()))
    }

    fn kind(&self) -> AlgorithmType {
        AlgorithmType::Spigot
    }

    fn name(&self) -> &str {
        "Spigot"
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
    fn test_spigot_terms() {
        assert_eq!(spigot_term(0, 20).unwrap(), dec("2"));
        // 4/6
        assert_eq!(
            spigot_term(1, 20).unwrap(),
            dec("2").checked_div(&dec("3"), 20).unwrap()
        );
        // 32/120
        assert_eq!(
            spigot_term(2, 20).unwrap(),
            dec("4").checked_div(&dec("15"), 20).unwrap()
        );
    }

    #[test]
    fn test_spigot_terms_roughly_halve() {
        let ctx = make_context(10, 20).unwrap();
        let earlier = spigot_term(20, ctx.precision()).unwrap();
        let later = spigot_term(21, ctx.precision()).unwrap();
        let ratio = later.checked_div(&earlier, 10).unwrap();
        // ratio is 21/43
        assert_eq!(ratio, dec("21").checked_div(&dec("43"), 10).unwrap());
    }

    #[test]
    fn test_leibniz_terms_alternate() {
        assert_eq!(leibniz_term(0, 10).unwrap(), dec("1"));
        assert!(leibniz_term(1, 10).unwrap().is_negative());
        assert_eq!(leibniz_term(2, 10).unwrap(), dec("0.2"));
    }

    #[test]
    fn test_leibniz_partial_sum_converges_slowly() {
        let reference = dec("3.14159265358979323846");

        let coarse = leibniz_partial_sum(100, 30).unwrap();
        let fine = leibniz_partial_sum(1000, 30).unwrap();

        let coarse_error = (&coarse - &reference).abs();
        let fine_error = (&fine - &reference).abs();

        // error ~ 1/n: ten times the terms buys one digit
        assert!(coarse_error > dec("0.009") && coarse_error < dec("0.011"));
        assert!(fine_error > dec("0.0009") && fine_error < dec("0.0011"));
    }

    #[test]
    fn test_spigot_ten_digits() {
        let pi = SpigotPi::new().compute_pi(10).unwrap();
        assert_eq!(pi.to_string(), "3.1415926536");
    }
}
