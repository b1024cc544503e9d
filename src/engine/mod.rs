// ============================================================================
// Engine Module
// Pi algorithms, the engine that runs them, and parallel sweeps
// ============================================================================

mod pi_engine;

pub mod bbp;
pub mod chudnovsky;
pub mod factory;
pub mod gauss_legendre;
pub mod machin;
pub mod series;
pub mod spigot;
pub mod sweep;

pub use bbp::BbpPi;
pub use chudnovsky::ChudnovskyPi;
pub use factory::{create_algorithm, create_from_config, PiEngineBuilder};
pub use gauss_legendre::{AgmState, GaussLegendrePi};
pub use machin::MachinPi;
pub use pi_engine::PiEngine;
pub use spigot::SpigotPi;
pub use sweep::{compare_algorithms, sweep_precisions};
