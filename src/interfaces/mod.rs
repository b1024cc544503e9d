// ============================================================================
// Interfaces Module
// Contracts shared by the engine and its algorithms
// ============================================================================

mod event_handler;
mod pi_algorithm;

pub use event_handler::{
    ComputationEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
};
pub use pi_algorithm::PiAlgorithm;
