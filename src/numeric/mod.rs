// ============================================================================
// Numeric Module
// Arbitrary-precision decimal arithmetic for pi computations
// ============================================================================
//
// This module provides:
// - ScaledDecimal: BigInt-backed decimal with runtime scale
// - sqrt: Newton-Raphson square root
// - factorial: exact integer factorial
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - Fallible arithmetic returns Result (no panics)
// - Every rounding is half-up to a caller-supplied precision

mod errors;
mod factorial;
mod scaled_decimal;
mod sqrt;

pub use errors::{NumericError, NumericResult};
pub use factorial::factorial;
pub(crate) use factorial::factorial_unsigned;
pub use scaled_decimal::ScaledDecimal;
pub use sqrt::sqrt;
