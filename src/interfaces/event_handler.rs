// ============================================================================
// Event Handler Interface
// Defines the contract for handling computation events
// ============================================================================

use crate::domain::AlgorithmType;
use crate::numeric::{NumericError, ScaledDecimal};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the pi engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComputationEvent {
    /// Computation requested
    ComputationStarted {
        computation_id: u64,
        algorithm: AlgorithmType,
        target_digits: i64,
        timestamp: DateTime<Utc>,
    },

    /// Working context derived from the request
    ContextDerived {
        computation_id: u64,
        working_precision: u64,
        guard_digits: u64,
        timestamp: DateTime<Utc>,
    },

    /// Computation finished with a rounded result
    ComputationCompleted {
        computation_id: u64,
        value: ScaledDecimal,
        timestamp: DateTime<Utc>,
    },

    /// Computation aborted
    ComputationFailed {
        computation_id: u64,
        error: NumericError,
        timestamp: DateTime<Utc>,
    },
}

impl ComputationEvent {
    pub fn computation_id(&self) -> u64 {
        match self {
            ComputationEvent::ComputationStarted { computation_id, .. }
            | ComputationEvent::ContextDerived { computation_id, .. }
            | ComputationEvent::ComputationCompleted { computation_id, .. }
            | ComputationEvent::ComputationFailed { computation_id, .. } => *computation_id,
        }
    }
}

/// Event handler trait for processing engine events
/// Implementations can handle logging, auditing, progress reporting, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a computation event
    fn on_event(&self, event: ComputationEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<ComputationEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: ComputationEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: ComputationEvent) {
        tracing::debug!("Pi engine event: {:?}", event);
    }
}

/// Collects every event it receives
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<ComputationEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events received so far
    pub fn events(&self) -> Vec<ComputationEvent> {
        self.events.lock().clone()
    }

    /// Drain the recorded events
    pub fn take_events(&self) -> Vec<ComputationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: ComputationEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(id: u64) -> ComputationEvent {
        ComputationEvent::ComputationStarted {
            computation_id: id,
            algorithm: AlgorithmType::Machin,
            target_digits: 10,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(started(0));
        // Should not panic
    }

    #[test]
    fn test_recording_handler() {
        let handler = RecordingEventHandler::new();
        handler.on_events(vec![started(1), started(2)]);

        let events = handler.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].computation_id(), 2);

        assert_eq!(handler.take_events().len(), 2);
        assert!(handler.events().is_empty());
    }
}
