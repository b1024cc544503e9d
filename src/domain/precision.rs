// ============================================================================
// Precision Context
// Working precision and convergence policy threaded through every algorithm
// ============================================================================

use crate::numeric::{NumericError, NumericResult, ScaledDecimal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of digits beyond the working target a term must fall
/// below before a series is considered converged
pub const DEFAULT_GUARD_MARGIN: u64 = 5;

/// Default number of leading terms that are always summed
pub const DEFAULT_MIN_TERMS: u64 = 2;

// ============================================================================
// Convergence Policy
// ============================================================================

/// Decides, from a generated term's magnitude, whether further summation is
/// unnecessary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvergencePolicy {
    /// Extra decimal places below the target a term must reach
    pub guard_margin: u64,
    /// Terms summed unconditionally before the test may fire
    pub min_terms: u64,
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            guard_margin: DEFAULT_GUARD_MARGIN,
            min_terms: DEFAULT_MIN_TERMS,
        }
    }
}

impl ConvergencePolicy {
    pub fn new(guard_margin: u64, min_terms: u64) -> Self {
        Self {
            guard_margin,
            min_terms,
        }
    }

    /// `|term| < 10^-(target + guard_margin)`
    pub fn is_converged(&self, term: &ScaledDecimal, target_digits: u64) -> bool {
        match term.magnitude_exponent() {
            None => true,
            Some(exponent) => {
                let threshold = target_digits.saturating_add(self.guard_margin);
                exponent < -i64::try_from(threshold).unwrap_or(i64::MAX)
            },
        }
    }

    /// Convergence test for the term at zero-based `index`; never fires
    /// before `min_terms` terms have been summed.
    pub fn should_stop(&self, index: u64, term: &ScaledDecimal, target_digits: u64) -> bool {
        index + 1 >= self.min_terms && self.is_converged(term, target_digits)
    }
}

// ============================================================================
// Precision Request
// ============================================================================

/// Per-invocation precision request: target digits plus optional guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionRequest {
    pub target_digits: i64,
    pub guard_digits: Option<u64>,
    pub policy: ConvergencePolicy,
}

impl PrecisionRequest {
    pub fn new(target_digits: i64) -> Self {
        Self {
            target_digits,
            guard_digits: None,
            policy: ConvergencePolicy::default(),
        }
    }

    /// Builder method: override the algorithm's default guard digits
    pub fn with_guard_digits(mut self, guard_digits: u64) -> Self {
        self.guard_digits = Some(guard_digits);
        self
    }

    /// Builder method: use a custom convergence policy
    pub fn with_policy(mut self, policy: ConvergencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Derive the working context, falling back to `default_guard` when no
    /// guard was requested.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-positive target, a zero guard, or
    /// digit counts whose sums leave the `i64` range.
    pub fn resolve(&self, default_guard: u64) -> NumericResult<WorkingContext> {
        let guard = self.guard_digits.unwrap_or(default_guard);
        WorkingContext::with_policy(self.target_digits, guard, self.policy)
    }
}

// ============================================================================
// Working Context
// ============================================================================

/// Immutable per-call context: every intermediate operation rounds to
/// `target + guard` significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingContext {
    target_digits: u64,
    guard_digits: u64,
    policy: ConvergencePolicy,
}

impl WorkingContext {
    /// `precision = target + guard` with the default convergence policy.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `target_digits <= 0` or `guard_digits == 0`.
    pub fn new(target_digits: i64, guard_digits: u64) -> NumericResult<Self> {
        Self::with_policy(target_digits, guard_digits, ConvergencePolicy::default())
    }

    /// Context with an explicit convergence policy.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-positive target, a zero guard, or
    /// when the working precision, convergence threshold or term cap would
    /// not fit in an `i64`.
    pub fn with_policy(
        target_digits: i64,
        guard_digits: u64,
        policy: ConvergencePolicy,
    ) -> NumericResult<Self> {
        if target_digits <= 0 || guard_digits == 0 {
            return Err(NumericError::InvalidArgument);
        }
        let target_digits = target_digits as u64;
        let fits = |digits: Option<u64>| digits.map_or(false, |d| i64::try_from(d).is_ok());
        let precision = target_digits.checked_add(guard_digits);
        let term_cap = precision
            .and_then(|p| p.checked_mul(10))
            .and_then(|p| p.checked_add(100));
        if !fits(term_cap) || !fits(target_digits.checked_add(policy.guard_margin)) {
            return Err(NumericError::InvalidArgument);
        }

        Ok(Self {
            target_digits,
            guard_digits,
            policy,
        })
    }

    /// Correct digits requested after the decimal point
    pub fn target_digits(&self) -> u64 {
        self.target_digits
    }

    pub fn guard_digits(&self) -> u64 {
        self.guard_digits
    }

    /// Working precision in significant digits
    pub fn precision(&self) -> u64 {
        self.target_digits + self.guard_digits
    }

    pub fn policy(&self) -> &ConvergencePolicy {
        &self.policy
    }

    /// Upper bound on series terms before giving up with `ConvergenceFailure`
    pub fn term_cap(&self) -> u64 {
        10 * self.precision() + 100
    }

    pub fn is_converged(&self, term: &ScaledDecimal) -> bool {
        self.policy.is_converged(term, self.target_digits)
    }

    pub fn should_stop(&self, index: u64, term: &ScaledDecimal) -> bool {
        self.policy.should_stop(index, term, self.target_digits)
    }

    /// Round a finished value half-up to exactly `target` fractional digits.
    pub fn finalize(&self, value: &ScaledDecimal) -> ScaledDecimal {
        value.round_to_scale(self.target_digits as i64)
    }
}

/// `precision = target + guard`
pub fn make_context(target_digits: i64, guard_digits: u64) -> NumericResult<WorkingContext> {
    WorkingContext::new(target_digits, guard_digits)
}
