// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision arithmetic and pi computations
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur during arithmetic or while computing pi.
///
/// Every failure is fatal to the call that produced it. Computations are
/// pure and deterministic, so retrying an identical call reproduces an
/// identical failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericError {
    /// Argument outside the operation's domain (non-positive target digits,
    /// negative factorial or square-root input, zero guard digits)
    InvalidArgument,
    /// Attempted division by zero
    DivisionByZero,
    /// Operation not supported for the given operands (negative exponents)
    UnsupportedOperation,
    /// Iteration cap exceeded without meeting the convergence threshold
    ConvergenceFailure,
    /// Input string is not a valid decimal number
    InvalidInput,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Value does not fit into the target representation
    Overflow,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidArgument => write!(f, "invalid argument"),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::UnsupportedOperation => {
                write!(f, "unsupported operation: negative exponents are not supported")
            },
            NumericError::ConvergenceFailure => write!(
                f,
                "convergence failure: iteration cap exceeded before reaching the threshold"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::Overflow => {
                write!(f, "overflow: value does not fit the target representation")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(NumericError::InvalidArgument.to_string(), "invalid argument");
        assert!(NumericError::ConvergenceFailure
            .to_string()
            .starts_with("convergence failure"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::InvalidArgument, NumericError::InvalidArgument);
        assert_ne!(NumericError::InvalidArgument, NumericError::DivisionByZero);
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(NumericError::UnsupportedOperation);
        assert!(err.to_string().contains("negative exponents"));
    }
}
