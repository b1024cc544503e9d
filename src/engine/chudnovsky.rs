// ============================================================================
// Chudnovsky Series
// 1/pi = 12 · Σ (−1)^k (6k)! (545140134k + 13591409) / ((3k)! (k!)^3 640320^(3k+3/2))
// ============================================================================

use crate::domain::{AlgorithmType, WorkingContext};
use crate::interfaces::PiAlgorithm;
use crate::numeric::{factorial_unsigned, sqrt, NumericResult, ScaledDecimal};
use num_bigint::BigInt;

/// Linear coefficient of the series numerator
const LINEAR_COEFFICIENT: u64 = 545_140_134;

/// Constant term of the series numerator
const CONSTANT_TERM: u64 = 13_591_409;

/// 640320^3
const CUBE_640320: u64 = 262_537_412_640_768_000;

/// Decimal digits gained per series term (log10(640320^3 / 1728))
pub const DIGITS_PER_TERM: f64 = 14.1816;

/// Terms added on top of `ceil(target / DIGITS_PER_TERM)`
pub const EXTRA_TERMS: u64 = 1;

/// Chudnovsky brothers' series: roughly 14 correct digits per term.
///
/// Each term keeps an exact integer numerator and denominator; the only
/// rounding happens at the per-term division and in the `426880·√10005`
/// constant.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChudnovskyPi;

impl ChudnovskyPi {
    pub fn new() -> Self {
        Self
    }

    /// Terms required for `target_digits` correct digits
    pub fn terms_for_digits(target_digits: u64) -> u64 {
        (target_digits as f64 / DIGITS_PER_TERM).ceil() as u64 + EXTRA_TERMS
    }

    /// Sum exactly `terms` series terms, bypassing the term-count law.
    pub fn compute_with_terms(
        &self,
        ctx: &WorkingContext,
        terms: u64,
    ) -> NumericResult<ScaledDecimal> {
        let precision = ctx.precision();

        // C = 426880 · sqrt(10005), computed once per call
        let root = sqrt(&ScaledDecimal::from_integer(10_005), precision)?;
        let constant = ScaledDecimal::from_integer(426_880).mul_rounded(&root, precision);

        let mut sum = ScaledDecimal::zero();
        for k in 0..terms {
            sum = sum.add_rounded(&chudnovsky_term(k, precision)?, precision);
        }

        let pi = constant.checked_div(&sum, precision)?;
        tracing::debug!(terms, precision, "chudnovsky complete");
        Ok(ctx.finalize(&pi))
    }
}

/// Exact numerator and denominator of term `k`, sign included in the
/// numerator:
/// `(−1)^k (6k)! (545140134k + 13591409)` over `(3k)! (k!)^3 640320^(3k)`.
pub fn chudnovsky_term_parts(k: u64) -> (BigInt, BigInt) {
    let sign = if k % 2 == 0 { BigInt::from(1) } else { BigInt::from(-1) };
    let linear = BigInt::from(LINEAR_COEFFICIENT) * k + CONSTANT_TERM;
    let numerator = sign * factorial_unsigned(6 * k) * linear;

    let k_factorial = factorial_unsigned(k);
    let power = num_traits::pow(BigInt::from(CUBE_640320), k as usize);
    let k_factorial_cubed = &k_factorial * &k_factorial * &k_factorial;
    let denominator = factorial_unsigned(3 * k) * k_factorial_cubed * power;

    (numerator, denominator)
}

/// Term `k` as a decimal rounded to `precision` significant digits
pub fn chudnovsky_term(k: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let (numerator, denominator) = chudnovsky_term_parts(k);
    ScaledDecimal::from_bigint(numerator)
        .checked_div(&ScaledDecimal::from_bigint(denominator), precision)
}

impl PiAlgorithm for ChudnovskyPi {
    fn compute_with_context(&self, ctx: &WorkingContext) -> NumericResult<ScaledDecimal> {
        self.compute_with_terms(ctx, Self::terms_for_digits(ctx.target_digits()))
    }

    fn kind(&self) -> AlgorithmType {
        AlgorithmType::Chudnovsky
    }

    fn name(&self) -> &str {
        "Chudnovsky"
    }
}
