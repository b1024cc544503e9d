// ============================================================================
// Parallel Sweeps
// Independent computations on scoped threads
// ============================================================================

use super::factory::create_algorithm;
use crate::domain::AlgorithmType;
use crate::numeric::{NumericResult, ScaledDecimal};
use std::panic;

/// Run every algorithm in `kinds` at the same target, one scoped thread per
/// algorithm. Results come back in input order.
///
/// # Example
/// ```
/// use pi_engine::prelude::*;
///
/// let results = compare_algorithms(&AlgorithmType::ALL, 8);
/// for (_, result) in &results {
///     assert_eq!(result.as_ref().unwrap().to_string(), "3.14159265");
/// }
/// ```
pub fn compare_algorithms(
    kinds: &[AlgorithmType],
    target_digits: i64,
) -> Vec<(AlgorithmType, NumericResult<ScaledDecimal>)> {
    let results = run_scoped(kinds, |kind| {
        create_algorithm(*kind).compute_pi(target_digits)
    });
    kinds.iter().copied().zip(results).collect()
}

/// Run one algorithm at several targets, one scoped thread per target.
/// Results come back in input order.
pub fn sweep_precisions(
    kind: AlgorithmType,
    targets: &[i64],
) -> Vec<(i64, NumericResult<ScaledDecimal>)> {
    let algorithm = create_algorithm(kind);
    let algorithm = algorithm.as_ref();
    let results = run_scoped(targets, |target| algorithm.compute_pi(*target));
    targets.iter().copied().zip(results).collect()
}

/// Apply `job` to every input on its own scoped thread and join in order.
/// A panicking job is re-raised on the calling thread.
fn run_scoped<I, T, F>(inputs: &[I], job: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync,
{
    let job = &job;
    let joined = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move |_| job(input)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect::<Vec<T>>()
    });

    tracing::debug!(jobs = inputs.len(), "sweep joined");
    joined.unwrap_or_else(|payload| panic::resume_unwind(payload))
}
