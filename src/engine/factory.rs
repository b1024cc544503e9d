// ============================================================================
// Pi Engine Factory
// Creates algorithms and engines from configuration
// ============================================================================

use crate::domain::config::{AlgorithmType, PiConfig};
use crate::engine::{BbpPi, ChudnovskyPi, GaussLegendrePi, MachinPi, PiEngine, SpigotPi};
use crate::interfaces::{EventHandler, PiAlgorithm};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates the algorithm for a tag
///
/// # Example
/// ```
/// use pi_engine::prelude::*;
///
/// let kind: AlgorithmType = "gauss-legendre".parse().unwrap();
/// let algorithm = create_algorithm(kind);
/// assert_eq!(algorithm.kind(), AlgorithmType::GaussLegendre);
/// ```
pub fn create_algorithm(kind: AlgorithmType) -> Box<dyn PiAlgorithm> {
    match kind {
        AlgorithmType::Machin => Box::new(MachinPi::new()),
        AlgorithmType::Chudnovsky => Box::new(ChudnovskyPi::new()),
        AlgorithmType::Bbp => Box::new(BbpPi::new()),
        AlgorithmType::GaussLegendre => Box::new(GaussLegendrePi::new()),
        AlgorithmType::Spigot => Box::new(SpigotPi::new()),
    }
}

/// Creates a pi engine from configuration
///
/// # Arguments
/// * `config` - Engine configuration
/// * `event_handler` - Event handler for computation events
///
/// # Returns
/// * `Result<PiEngine, String>` - Configured engine or validation error
///
/// # Example
/// ```
/// use pi_engine::prelude::*;
/// use std::sync::Arc;
///
/// let engine = create_from_config(PiConfig::fast(), Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(engine.algorithm_name(), "Chudnovsky");
/// ```
pub fn create_from_config(
    config: PiConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<PiEngine, String> {
    let algorithm = create_algorithm(config.algorithm);
    PiEngine::new(algorithm, event_handler, config)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating pi engines with fluent API
///
/// # Example
/// ```
/// use pi_engine::prelude::*;
/// use std::sync::Arc;
///
/// let engine = PiEngineBuilder::new(AlgorithmType::Machin)
///     .with_guard_digits(20)
///     .with_guard_margin(6)
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
///
/// assert_eq!(engine.compute(5).unwrap().to_string(), "3.14159");
/// ```
pub struct PiEngineBuilder {
    config: PiConfig,
}

impl PiEngineBuilder {
    /// Create a new builder for the specified algorithm
    pub fn new(algorithm: AlgorithmType) -> Self {
        Self {
            config: PiConfig::new(algorithm),
        }
    }

    /// Switch to another algorithm, keeping the precision tuning
    pub fn algorithm(mut self, algorithm: AlgorithmType) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    // ========================================================================
    // Precision Configuration
    // ========================================================================

    pub fn with_guard_digits(mut self, guard_digits: u64) -> Self {
        self.config.guard_digits = Some(guard_digits);
        self
    }

    /// Fall back to the algorithm's default guard digits
    pub fn default_guard_digits(mut self) -> Self {
        self.config.guard_digits = None;
        self
    }

    pub fn with_guard_margin(mut self, guard_margin: u64) -> Self {
        self.config.guard_margin = guard_margin;
        self
    }

    pub fn with_min_terms(mut self, min_terms: u64) -> Self {
        self.config.min_terms = min_terms;
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Chudnovsky with default tuning
    pub fn fast() -> Self {
        Self {
            config: PiConfig::fast(),
        }
    }

    /// Spigot baseline
    pub fn baseline() -> Self {
        Self {
            config: PiConfig::baseline(),
        }
    }

    /// Gauss–Legendre with widened guard digits
    pub fn high_precision() -> Self {
        Self {
            config: PiConfig::high_precision(),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the pi engine
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> Result<PiEngine, String> {
        create_from_config(self.config, event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &PiConfig {
        &self.config
    }
}
