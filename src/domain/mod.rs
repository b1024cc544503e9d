// ============================================================================
// Domain Models Module
// Precision requests, working contexts and engine configuration
// ============================================================================

pub mod config;
pub mod precision;

pub use config::{AlgorithmType, PiConfig};
pub use precision::{
    make_context, ConvergencePolicy, PrecisionRequest, WorkingContext, DEFAULT_GUARD_MARGIN,
    DEFAULT_MIN_TERMS,
};
