// ============================================================================
// Pi Engine
// Runs one configured algorithm and reports computation events
// ============================================================================

use crate::domain::PiConfig;
use crate::interfaces::{ComputationEvent, EventHandler, PiAlgorithm};
use crate::numeric::{NumericResult, ScaledDecimal};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pi engine with a pluggable algorithm
pub struct PiEngine {
    /// Pluggable pi algorithm
    algorithm: Box<dyn PiAlgorithm>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,

    /// Precision tuning applied to every request
    config: PiConfig,

    /// Sequence counter for computation ids
    computation_counter: AtomicU64,
}

impl PiEngine {
    /// Create a new pi engine
    ///
    /// `config.algorithm` is overwritten with the algorithm's own kind so the
    /// two never disagree; the result is then validated.
    ///
    /// # Errors
    /// Returns the `PiConfig::validate` message for an invalid configuration.
    pub fn new(
        algorithm: Box<dyn PiAlgorithm>,
        event_handler: Arc<dyn EventHandler>,
        config: PiConfig,
    ) -> Result<Self, String> {
        let config = PiConfig {
            algorithm: algorithm.kind(),
            ..config
        };
        config.validate()?;

        Ok(Self {
            algorithm,
            event_handler,
            config,
            computation_counter: AtomicU64::new(0),
        })
    }

    /// Compute pi to `target_digits` decimal places
    pub fn compute(&self, target_digits: i64) -> NumericResult<ScaledDecimal> {
        self.compute_with_events(target_digits).0
    }

    /// Compute pi and return the events emitted along the way
    pub fn compute_with_events(
        &self,
        target_digits: i64,
    ) -> (NumericResult<ScaledDecimal>, Vec<ComputationEvent>) {
        let computation_id = self.computation_counter.fetch_add(1, Ordering::AcqRel);
        let mut events = Vec::new();

        // Event: Computation started
        events.push(ComputationEvent::ComputationStarted {
            computation_id,
            algorithm: self.algorithm.kind(),
            target_digits,
            timestamp: Utc::now(),
        });

        let result = self
            .config
            .request(target_digits)
            .resolve(self.algorithm.default_guard_digits())
            .and_then(|ctx| {
                events.push(ComputationEvent::ContextDerived {
                    computation_id,
                    working_precision: ctx.precision(),
                    guard_digits: ctx.guard_digits(),
                    timestamp: Utc::now(),
                });
                self.algorithm.compute_with_context(&ctx)
            });

        match &result {
            Ok(value) => {
                tracing::debug!(
                    computation_id,
                    algorithm = self.algorithm.name(),
                    target_digits,
                    "computation completed"
                );
                events.push(ComputationEvent::ComputationCompleted {
                    computation_id,
                    value: value.clone(),
                    timestamp: Utc::now(),
                });
            },
            Err(error) => {
                tracing::warn!(
                    computation_id,
                    algorithm = self.algorithm.name(),
                    target_digits,
                    %error,
                    "computation failed"
                );
                events.push(ComputationEvent::ComputationFailed {
                    computation_id,
                    error: *error,
                    timestamp: Utc::now(),
                });
            },
        }

        // Emit events
        self.event_handler.on_events(events.clone());

        (result, events)
    }

    /// Get the algorithm name
    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    pub fn config(&self) -> &PiConfig {
        &self.config
    }

    /// Number of computations started so far
    pub fn computations(&self) -> u64 {
        self.computation_counter.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AlgorithmType;
    use crate::engine::{ChudnovskyPi, GaussLegendrePi, MachinPi};
    use crate::interfaces::{NoOpEventHandler, RecordingEventHandler};
    use crate::numeric::NumericError;

    #[test]
    fn test_pi_engine_basic() {
        let engine = PiEngine::new(
            Box::new(MachinPi::new()),
            Arc::new(NoOpEventHandler),
            PiConfig::new(AlgorithmType::Machin),
        )
        .unwrap();

        let pi = engine.compute(10).unwrap();
        assert_eq!(pi.to_string(), "3.1415926536");
        assert_eq!(engine.algorithm_name(), "Machin");
        assert_eq!(engine.computations(), 1);
    }

    #[test]
    fn test_config_follows_algorithm() {
        let engine = PiEngine::new(
            Box::new(ChudnovskyPi::new()),
            Arc::new(NoOpEventHandler),
            PiConfig::new(AlgorithmType::Spigot),
        )
        .unwrap();
        assert_eq!(engine.config().algorithm, AlgorithmType::Chudnovsky);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = PiEngine::new(
            Box::new(MachinPi::new()),
            Arc::new(NoOpEventHandler),
            PiConfig::new(AlgorithmType::Machin).with_min_terms(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_validates_against_the_boxed_algorithm() {
        // margin 12 fits Chudnovsky's 15 default guard digits, not Gauss-Legendre's 10
        let config = PiConfig::new(AlgorithmType::Chudnovsky).with_guard_margin(12);
        assert!(config.validate().is_ok());

        let result = PiEngine::new(
            Box::new(GaussLegendrePi::new()),
            Arc::new(NoOpEventHandler),
            config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_events_on_success() {
        let handler = Arc::new(RecordingEventHandler::new());
        let engine = PiEngine::new(
            Box::new(ChudnovskyPi::new()),
            handler.clone(),
            PiConfig::new(AlgorithmType::Chudnovsky).with_guard_digits(12),
        )
        .unwrap();

        let (result, events) = engine.compute_with_events(20);
        assert!(result.is_ok());
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            ComputationEvent::ComputationStarted { target_digits: 20, .. }
        ));
        assert!(matches!(
            events[1],
            ComputationEvent::ContextDerived {
                working_precision: 32,
                guard_digits: 12,
                ..
            }
        ));
        assert!(matches!(events[2], ComputationEvent::ComputationCompleted { .. }));

        // handler receives the same batch
        assert_eq!(handler.events(), events);
    }

    #[test]
    fn test_events_on_failure() {
        let engine = PiEngine::new(
            Box::new(MachinPi::new()),
            Arc::new(NoOpEventHandler),
            PiConfig::new(AlgorithmType::Machin),
        )
        .unwrap();

        let (result, events) = engine.compute_with_events(0);
        assert_eq!(result, Err(NumericError::InvalidArgument));
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            ComputationEvent::ComputationFailed {
                error: NumericError::InvalidArgument,
                ..
            }
        ));
    }

    #[test]
    fn test_computation_ids_increase() {
        let engine = PiEngine::new(
            Box::new(MachinPi::new()),
            Arc::new(NoOpEventHandler),
            PiConfig::new(AlgorithmType::Machin),
        )
        .unwrap();

        let (_, first) = engine.compute_with_events(5);
        let (_, second) = engine.compute_with_events(5);
        assert_eq!(first[0].computation_id(), 0);
        assert_eq!(second[0].computation_id(), 1);
    }
}
