// ============================================================================
// Pi Algorithm Interface
// Defines the contract for interchangeable pi algorithms
// ============================================================================

use crate::domain::{AlgorithmType, PrecisionRequest, WorkingContext};
use crate::numeric::{NumericResult, ScaledDecimal};

/// Strategy pattern interface for pi algorithms
/// Implementations: Machin, Chudnovsky, BBP, Gauss–Legendre, Spigot
pub trait PiAlgorithm: Send + Sync {
    /// Compute pi under an already-derived working context
    ///
    /// # Arguments
    /// * `ctx` - Working context (target digits, guard digits, convergence policy)
    ///
    /// # Returns
    /// Pi rounded half-up to exactly `ctx.target_digits()` fractional digits
    fn compute_with_context(&self, ctx: &WorkingContext) -> NumericResult<ScaledDecimal>;

    /// Which of the five algorithms this is
    fn kind(&self) -> AlgorithmType;

    /// Get the algorithm name for logging
    fn name(&self) -> &str;

    /// Guard digits used when the caller does not pick any
    fn default_guard_digits(&self) -> u64 {
        self.kind().default_guard_digits()
    }

    /// Compute pi to `target_digits` correct decimal places
    ///
    /// # Errors
    /// `InvalidArgument` if `target_digits <= 0`; any arithmetic failure of
    /// the algorithm itself.
    fn compute_pi(&self, target_digits: i64) -> NumericResult<ScaledDecimal> {
        let ctx = PrecisionRequest::new(target_digits).resolve(self.default_guard_digits())?;
        self.compute_with_context(&ctx)
    }
}
