// ============================================================================
// Gauss–Legendre Algorithm
// Arithmetic-geometric mean iteration with quadratic convergence
// ============================================================================

use crate::domain::{AlgorithmType, WorkingContext};
use crate::interfaces::PiAlgorithm;
use crate::numeric::{sqrt, NumericResult, ScaledDecimal};

/// Iterations added on top of `ceil(log2(target))`
pub const EXTRA_ITERATIONS: u32 = 5;

/// One state of the AGM iteration: `(a, b, t, p)`.
///
/// States are immutable; [`AgmState::next`] produces the successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgmState {
    pub a: ScaledDecimal,
    pub b: ScaledDecimal,
    pub t: ScaledDecimal,
    pub p: ScaledDecimal,
}

impl AgmState {
    /// `(1, 1/√2, 1/4, 1)`
    pub fn initial(precision: u64) -> NumericResult<Self> {
        let one = ScaledDecimal::one();
        let root_two = sqrt(&ScaledDecimal::from_integer(2), precision)?;

        Ok(Self {
            a: one.clone(),
            b: one.checked_div(&root_two, precision)?,
            t: ScaledDecimal::new(25, 2),
            p: one,
        })
    }

    /// `a' = (a+b)/2`, `b' = √(ab)`, `t' = t − p(a−a')²`, `p' = 2p`
    pub fn next(&self, precision: u64) -> NumericResult<Self> {
        let two = ScaledDecimal::from_integer(2);

        let a = self.a.add_rounded(&self.b, precision).checked_div(&two, precision)?;
        let b = sqrt(&self.a.mul_rounded(&self.b, precision), precision)?;

        let gap = self.a.sub_rounded(&a, precision);
        let correction = self
            .p
            .mul_rounded(&gap.mul_rounded(&gap, precision), precision);
        let t = self.t.sub_rounded(&correction, precision);

        let p = &self.p * &two;

        Ok(Self { a, b, t, p })
    }

    /// `(a+b)² / 4t`
    pub fn pi_estimate(&self, precision: u64) -> NumericResult<ScaledDecimal> {
        let sum = self.a.add_rounded(&self.b, precision);
        let numerator = sum.mul_rounded(&sum, precision);
        let denominator = ScaledDecimal::from_integer(4).mul_rounded(&self.t, precision);
        numerator.checked_div(&denominator, precision)
    }
}

/// Gauss–Legendre (Brent–Salamin) algorithm: each iteration roughly doubles
/// the number of correct digits, at the cost of a full-precision square root.
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussLegendrePi;

impl GaussLegendrePi {
    pub fn new() -> Self {
        Self
    }

    /// `ceil(log2(target)) + 5`
    pub fn iterations_for_digits(target_digits: u64) -> u32 {
        let ceil_log2 = match target_digits {
            0 | 1 => 0,
            n => u64::BITS - (n - 1).leading_zeros(),
        };
        ceil_log2 + EXTRA_ITERATIONS
    }

    /// Unrounded pi estimate after exactly `iterations` AGM steps, at the
    /// context's working precision.
    pub fn estimate_after(
        &self,
        iterations: u32,
        ctx: &WorkingContext,
    ) -> NumericResult<ScaledDecimal> {
        let precision = ctx.precision();
        let mut state = AgmState::initial(precision)?;
        for _ in 0..iterations {
            state = state.next(precision)?;
        }
        state.pi_estimate(precision)
    }
}

impl PiAlgorithm for GaussLegendrePi {
    fn compute_with_context(&self, ctx: &WorkingContext) -> NumericResult<ScaledDecimal> {
        let iterations = Self::iterations_for_digits(ctx.target_digits());
        let pi = self.estimate_after(iterations, ctx)?;
        tracing::debug!(iterations, precision = ctx.precision(), "gauss-legendre complete");
        Ok(ctx.finalize(&pi))
    }

    fn kind(&self) -> AlgorithmType {
        AlgorithmType::GaussLegendre
    }

    fn name(&self) -> &str {
        "Gauss-Legendre"
    }
}
