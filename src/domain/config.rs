// ============================================================================
// Pi Engine Configuration
// Algorithm selection and precision tuning
// ============================================================================

use super::precision::{
    ConvergencePolicy, PrecisionRequest, DEFAULT_GUARD_MARGIN, DEFAULT_MIN_TERMS,
};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Algorithm Type
// ============================================================================

/// The closed set of algorithms the engine can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AlgorithmType {
    /// Machin-like arctangent formula: 16·arctan(1/5) − 4·arctan(1/239)
    /// Linear convergence, ~1.4 digits per arctan(1/5) term
    Machin,

    /// Chudnovsky hypergeometric series
    /// ~14 digits per term, needs one square root
    Chudnovsky,

    /// Bailey–Borwein–Plouffe base-16 series
    /// ~1.2 digits per term
    Bbp,

    /// Gauss–Legendre arithmetic-geometric mean iteration
    /// Quadratic convergence, one square root per iteration
    GaussLegendre,

    /// Euler-accelerated Leibniz series (spigot baseline)
    /// ~0.3 digits per term, deliberately slow
    Spigot,
}

impl AlgorithmType {
    /// All five algorithms in declaration order
    pub const ALL: [AlgorithmType; 5] = [
        AlgorithmType::Machin,
        AlgorithmType::Chudnovsky,
        AlgorithmType::Bbp,
        AlgorithmType::GaussLegendre,
        AlgorithmType::Spigot,
    ];

    /// Guard digits used when a request does not specify any
    pub fn default_guard_digits(self) -> u64 {
        match self {
            AlgorithmType::Machin | AlgorithmType::Chudnovsky | AlgorithmType::Bbp => 15,
            AlgorithmType::GaussLegendre => 10,
            AlgorithmType::Spigot => 20,
        }
    }

    /// Stable tag used for parsing and display
    pub fn tag(self) -> &'static str {
        match self {
            AlgorithmType::Machin => "machin",
            AlgorithmType::Chudnovsky => "chudnovsky",
            AlgorithmType::Bbp => "bbp",
            AlgorithmType::GaussLegendre => "gauss-legendre",
            AlgorithmType::Spigot => "spigot",
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for AlgorithmType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "machin" | "machin-like" => Ok(AlgorithmType::Machin),
            "chudnovsky" => Ok(AlgorithmType::Chudnovsky),
            "bbp" | "bailey-borwein-plouffe" => Ok(AlgorithmType::Bbp),
            "gauss-legendre" | "gausslegendre" | "agm" => Ok(AlgorithmType::GaussLegendre),
            "spigot" | "leibniz" => Ok(AlgorithmType::Spigot),
            _ => Err(format!("Unknown algorithm: {}", s)),
        }
    }
}

// ============================================================================
// Complete Engine Configuration
// ============================================================================

/// Configuration for creating a pi engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiConfig {
    /// Algorithm to run
    pub algorithm: AlgorithmType,

    /// Optional: Guard digits on top of the target
    /// None means the algorithm's default
    pub guard_digits: Option<u64>,

    /// Digits below the target a term must reach to stop a series
    pub guard_margin: u64,

    /// Leading terms summed before the convergence test may fire
    pub min_terms: u64,
}

impl PiConfig {
    /// Create a new configuration with default precision tuning
    pub fn new(algorithm: AlgorithmType) -> Self {
        Self {
            algorithm,
            guard_digits: None,
            guard_margin: DEFAULT_GUARD_MARGIN,
            min_terms: DEFAULT_MIN_TERMS,
        }
    }

    /// Builder method: Set guard digits
    pub fn with_guard_digits(mut self, guard_digits: u64) -> Self {
        self.guard_digits = Some(guard_digits);
        self
    }

    /// Builder method: Set convergence guard margin
    pub fn with_guard_margin(mut self, guard_margin: u64) -> Self {
        self.guard_margin = guard_margin;
        self
    }

    /// Builder method: Set minimum summed terms
    pub fn with_min_terms(mut self, min_terms: u64) -> Self {
        self.min_terms = min_terms;
        self
    }

    /// Guard digits after applying the algorithm default
    pub fn effective_guard_digits(&self) -> u64 {
        self.guard_digits
            .unwrap_or_else(|| self.algorithm.default_guard_digits())
    }

    pub fn policy(&self) -> ConvergencePolicy {
        ConvergencePolicy::new(self.guard_margin, self.min_terms)
    }

    /// Precision request for one computation under this configuration
    pub fn request(&self, target_digits: i64) -> PrecisionRequest {
        PrecisionRequest::new(target_digits)
            .with_guard_digits(self.effective_guard_digits())
            .with_policy(self.policy())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.guard_digits == Some(0) {
            return Err("Guard digits must be positive".to_string());
        }

        if let Some(guard) = self.guard_digits {
            if self.guard_margin >= guard {
                return Err("Guard margin must be smaller than guard digits".to_string());
            }
        } else if self.guard_margin >= self.algorithm.default_guard_digits() {
            return Err("Guard margin must be smaller than default guard digits".to_string());
        }

        if self.min_terms == 0 {
            return Err("Minimum terms must be at least 1".to_string());
        }

        Ok(())
    }

    /// Load a configuration from JSON
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl PiConfig {
    /// Fastest series for high digit counts
    /// - Chudnovsky, default guard
    pub fn fast() -> Self {
        Self::new(AlgorithmType::Chudnovsky)
    }

    /// Slow comparison baseline
    /// - Spigot series, extra headroom
    pub fn baseline() -> Self {
        Self::new(AlgorithmType::Spigot)
    }

    /// Gauss–Legendre with widened guard digits
    pub fn high_precision() -> Self {
        Self::new(AlgorithmType::GaussLegendre).with_guard_digits(20)
    }
}
