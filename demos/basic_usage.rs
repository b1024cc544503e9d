// ============================================================================
// Basic Usage Example
// ============================================================================

use pi_engine::prelude::*;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    pi_engine::utils::init_logging("pi_engine=debug").unwrap();

    println!("=== Pi Engine Example ===\n");

    // One engine per algorithm, all at the same target
    let digits = 50;
    println!("Computing pi to {} digits with every algorithm...", digits);
    for kind in AlgorithmType::ALL {
        let engine = PiEngineBuilder::new(kind)
            .build(Arc::new(LoggingEventHandler))
            .unwrap();

        let (result, events) = engine.compute_with_events(digits);
        match result {
            Ok(pi) => println!("  {:<15} {}", engine.algorithm_name(), pi),
            Err(error) => println!("  {:<15} failed: {}", engine.algorithm_name(), error),
        }

        for event in &events {
            if let ComputationEvent::ContextDerived {
                working_precision,
                guard_digits,
                ..
            } = event
            {
                println!(
                    "  {:<15} working precision {} ({} guard digits)",
                    "", working_precision, guard_digits
                );
            }
        }
    }

    // Parallel comparison
    println!("\n=== Parallel Comparison (20 digits) ===");
    for (kind, result) in compare_algorithms(&AlgorithmType::ALL, 20) {
        match result {
            Ok(pi) => println!("  {:<15} {}", kind, pi),
            Err(error) => println!("  {:<15} failed: {}", kind, error),
        }
    }

    // Precision sweep
    println!("\n=== Chudnovsky Precision Sweep ===");
    for (target, result) in sweep_precisions(AlgorithmType::Chudnovsky, &[10, 30, 100]) {
        match result {
            Ok(pi) => println!("  {:>4} digits: {}", target, pi),
            Err(error) => println!("  {:>4} digits: failed: {}", target, error),
        }
    }

    // Hexadecimal digits straight from the BBP formula
    println!("\n=== BBP Hex Digits ===");
    println!("  pi = 3.{}...", hex_digits(1, 24).unwrap());
    println!("  hex digit 1000: {:X}", hex_digit(1000).unwrap());

    // Invalid requests are rejected, never panicked on
    println!("\n=== Invalid Request ===");
    match MachinPi::new().compute_pi(0) {
        Ok(pi) => println!("  unexpected result {}", pi),
        Err(error) => println!("  compute_pi(0): {}", error),
    }
}
