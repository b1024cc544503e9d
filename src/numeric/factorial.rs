// ============================================================================
// Factorial
// Exact integer factorial for hypergeometric series terms
// ============================================================================

use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_traits::One;

/// Exact factorial `n!` as a big integer.
///
/// Computed as an iterative product over `2..=n` without any rounding, so
/// series terms can keep exact numerators and denominators until their final
/// division.
///
/// # Errors
/// Returns `InvalidArgument` if `n` is negative.
pub fn factorial(n: i64) -> NumericResult<BigInt> {
    let n = u64::try_from(n).map_err(|_| NumericError::InvalidArgument)?;
    Ok(factorial_unsigned(n))
}

/// Factorial for an index already known to be non-negative.
pub(crate) fn factorial_unsigned(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, factor| acc * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_small_factorials() {
        assert_eq!(factorial(0).unwrap(), BigInt::from(1));
        assert_eq!(factorial(1).unwrap(), BigInt::from(1));
        assert_eq!(factorial(5).unwrap(), BigInt::from(120));
        assert_eq!(factorial(10).unwrap(), BigInt::from(3_628_800));
    }

    #[test]
    fn test_large_factorial_is_exact() {
        let expected: BigInt = "30414093201713378043612608166064768844377641568960512000000000000"
            .parse()
            .unwrap();
        assert_eq!(factorial(50).unwrap(), expected);
    }

    #[test]
    fn test_negative_factorial_is_invalid() {
        assert_eq!(factorial(-1), Err(NumericError::InvalidArgument));
        assert_eq!(factorial(i64::MIN), Err(NumericError::InvalidArgument));
    }

    quickcheck! {
        fn prop_factorial_recurrence(n: u8) -> bool {
            let n = u64::from(n % 100) + 1;
            factorial_unsigned(n) == factorial_unsigned(n - 1) * BigInt::from(n)
        }
    }
}
