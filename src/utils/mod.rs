// ============================================================================
// Utilities Module
// Logging setup for binaries built on the engine
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::init_logging;
