// ============================================================================
// Pi Engine Library
// Arbitrary-precision computation of pi with pluggable classical algorithms
// ============================================================================

//! # Pi Engine
//!
//! Computes pi to a caller-chosen number of decimal places with five
//! interchangeable algorithms, all built on an arbitrary-precision decimal
//! type with half-up rounding.
//!
//! ## Features
//!
//! - **Five algorithms**: Machin, Chudnovsky, BBP, Gauss–Legendre and an
//!   accelerated Leibniz spigot baseline
//! - **Shared precision model**: every intermediate result is rounded to
//!   target + guard significant digits, series stop under one convergence policy
//! - **BBP hex-digit extraction** without computing the preceding digits
//! - **Event reporting** for auditing and progress display
//! - **Parallel sweeps** over algorithms or targets on scoped threads
//!
//! ## Example
//!
//! ```rust
//! use pi_engine::prelude::*;
//! use std::sync::Arc;
//!
//! // Create a pi engine running the Chudnovsky series
//! let engine = PiEngineBuilder::new(AlgorithmType::Chudnovsky)
//!     .build(Arc::new(NoOpEventHandler))
//!     .unwrap();
//!
//! let pi = engine.compute(20).unwrap();
//! assert_eq!(pi.to_string(), "3.14159265358979323846");
//!
//! // Any algorithm can also be driven directly
//! let pi = GaussLegendrePi::new().compute_pi(10).unwrap();
//! println!("pi = {}", pi);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        make_context, AlgorithmType, ConvergencePolicy, PiConfig, PrecisionRequest,
        WorkingContext,
    };
    pub use crate::engine::bbp::{hex_digit, hex_digits};
    pub use crate::engine::{
        compare_algorithms, create_algorithm, create_from_config, sweep_precisions, BbpPi,
        ChudnovskyPi, GaussLegendrePi, MachinPi, PiEngine, PiEngineBuilder, SpigotPi,
    };
    pub use crate::interfaces::{
        ComputationEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, PiAlgorithm,
        RecordingEventHandler,
    };
    pub use crate::numeric::{NumericError, NumericResult, ScaledDecimal};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::engine::chudnovsky::DIGITS_PER_TERM;
    use crate::numeric::{factorial, sqrt};
    use std::sync::Arc;

    const PI_100: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

    const EXPECTED: [(i64, &str); 4] = [
        (5, "3.14159"),
        (10, "3.1415926536"),
        (20, "3.14159265358979323846"),
        (50, "3.14159265358979323846264338327950288419716939937511"),
    ];

    fn reference() -> ScaledDecimal {
        PI_100.parse().unwrap()
    }

    fn error_of(value: &ScaledDecimal) -> ScaledDecimal {
        (value - &reference()).abs()
    }

    #[test]
    fn test_every_algorithm_matches_reference() {
        for kind in AlgorithmType::ALL {
            let algorithm = create_algorithm(kind);
            for (digits, expected) in EXPECTED {
                let pi = algorithm.compute_pi(digits).unwrap();
                assert_eq!(pi.to_string(), expected, "{} at {} digits", kind, digits);
                assert_eq!(pi.scale(), digits);
            }
        }
    }

    #[test]
    fn test_results_are_deterministic() {
        for kind in AlgorithmType::ALL {
            let algorithm = create_algorithm(kind);
            let first = algorithm.compute_pi(30).unwrap();
            let second = algorithm.compute_pi(30).unwrap();
            assert_eq!(first, second, "{} is not deterministic", kind);
        }
    }

    #[test]
    fn test_accuracy_improves_with_digits() {
        for kind in AlgorithmType::ALL {
            let algorithm = create_algorithm(kind);
            let mut previous_error: Option<ScaledDecimal> = None;

            for digits in [1, 3, 8, 15, 30, 40] {
                let pi = algorithm.compute_pi(digits).unwrap();
                let error = error_of(&pi);

                // within half a unit in the last place
                let half_ulp = ScaledDecimal::new(5, digits + 1);
                assert!(error <= half_ulp, "{} at {} digits: error {}", kind, digits, error);

                if let Some(previous) = &previous_error {
                    assert!(&error <= previous, "{} regressed at {} digits", kind, digits);
                }
                previous_error = Some(error);
            }
        }
    }

    #[test]
    fn test_gauss_legendre_quadratic_convergence() {
        let ctx = make_context(50, 10).unwrap();
        let algorithm = GaussLegendrePi::new();

        let errors: Vec<ScaledDecimal> = (1..=4)
            .map(|iterations| error_of(&algorithm.estimate_after(iterations, &ctx).unwrap()))
            .collect();

        let ten = ScaledDecimal::from_integer(10);
        for pair in errors.windows(2) {
            assert!(&pair[1] * &ten <= pair[0], "{} then {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_chudnovsky_term_count_law() {
        let algorithm = ChudnovskyPi::new();

        for digits in [13, 28, 42, 50, 99] {
            let ctx = make_context(digits, 15).unwrap();
            let expected = reference().round_to_scale(digits);

            let terms = ChudnovskyPi::terms_for_digits(digits as u64);
            let pi = algorithm.compute_with_terms(&ctx, terms);
            assert_eq!(pi, Ok(expected.clone()), "{} terms at {} digits", terms, digits);

            // one term fewer than ceil(d / 14.18) cannot carry d digits
            let short = (digits as f64 / DIGITS_PER_TERM).ceil() as u64 - 1;
            let truncated = algorithm.compute_with_terms(&ctx, short);
            assert_ne!(truncated, Ok(expected), "{} terms at {} digits", short, digits);
        }
    }

    #[test]
    fn test_boundary_failures() {
        for kind in AlgorithmType::ALL {
            let algorithm = create_algorithm(kind);
            assert_eq!(algorithm.compute_pi(0), Err(NumericError::InvalidArgument));
            assert_eq!(algorithm.compute_pi(-1), Err(NumericError::InvalidArgument));
        }

        assert_eq!(
            sqrt(&ScaledDecimal::from_integer(-1), 20),
            Err(NumericError::InvalidArgument)
        );
        assert_eq!(factorial(-1), Err(NumericError::InvalidArgument));
    }

    #[test]
    fn test_hex_digits_agree_with_decimal_value() {
        // 3.243F6A88 in hex = 3 + 0x243F6A88 / 16^8
        let hex = hex_digits(1, 8).unwrap();
        let fraction = u64::from_str_radix(&hex, 16).unwrap();
        let value = ScaledDecimal::from_integer(3)
            .add_rounded(
                &ScaledDecimal::from(fraction)
                    .checked_div(&ScaledDecimal::from(1u64 << 32), 30)
                    .unwrap(),
                30,
            );
        assert!(error_of(&value) < ScaledDecimal::new(1, 9));
    }

    #[test]
    fn test_engine_end_to_end() {
        let handler = Arc::new(RecordingEventHandler::new());
        let engine = create_from_config(PiConfig::high_precision(), handler.clone()).unwrap();

        let pi = engine.compute(50).unwrap();
        assert_eq!(pi.to_string(), EXPECTED[3].1);

        let events = handler.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[1],
            ComputationEvent::ContextDerived {
                working_precision: 70,
                guard_digits: 20,
                ..
            }
        ));
        match &events[2] {
            ComputationEvent::ComputationCompleted { value, .. } => assert_eq!(value, &pi),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_sweep_matches_direct_calls() {
        let targets = [5, 10, 20];
        for (target, result) in sweep_precisions(AlgorithmType::Bbp, &targets) {
            assert_eq!(result, BbpPi::new().compute_pi(target));
        }
    }
}
