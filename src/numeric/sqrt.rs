// ============================================================================
// Square Root
// Newton-Raphson iteration over ScaledDecimal
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::scaled_decimal::ScaledDecimal;

/// Digits below the working precision that the Newton step may still wobble
const TOLERANCE_HEADROOM: u64 = 5;

/// Square root of `value` rounded to `precision` significant digits.
///
/// Iterates `y' = (y + x/y) / 2` starting from `x/2` (for `x > 1`) or `1`,
/// and stops once two successive estimates differ by less than
/// `10^(e - (precision - 5))`, where `e` is the decimal exponent of the
/// estimate.
///
/// # Errors
/// - `InvalidArgument` if `value` is negative or `precision` is zero
/// - `ConvergenceFailure` if the iteration cap is reached
pub fn sqrt(value: &ScaledDecimal, precision: u64) -> NumericResult<ScaledDecimal> {
    if value.is_negative() || precision == 0 {
        return Err(NumericError::InvalidArgument);
    }
    if value.is_zero() {
        return Ok(ScaledDecimal::zero());
    }

    let two = ScaledDecimal::from_integer(2);
    let mut estimate = if *value > ScaledDecimal::one() {
        value.checked_div(&two, precision)?
    } else {
        ScaledDecimal::one()
    };

    let max_iterations = iteration_cap(value, precision);
    for iteration in 0..max_iterations {
        let quotient = value.checked_div(&estimate, precision)?;
        let next = estimate
            .add_rounded(&quotient, precision)
            .checked_div(&two, precision)?;

        if within_tolerance(&estimate, &next, precision) {
            tracing::trace!(iteration, precision, "square root converged");
            return Ok(next);
        }
        estimate = next;
    }

    tracing::warn!(max_iterations, precision, "square root did not converge");
    Err(NumericError::ConvergenceFailure)
}

/// Safety net on Newton iterations: quadratic convergence plus the halving
/// steps needed to walk a far-off initial guess down (or up) to the root.
fn iteration_cap(value: &ScaledDecimal, precision: u64) -> u64 {
    let exponent = value.magnitude_exponent().unwrap_or(0).unsigned_abs();
    2 * precision + 4 * exponent
}

fn within_tolerance(previous: &ScaledDecimal, next: &ScaledDecimal, precision: u64) -> bool {
    let delta = next - previous;
    let (Some(delta_exp), Some(next_exp)) = (delta.magnitude_exponent(), next.magnitude_exponent())
    else {
        return true;
    };
    let tolerance_digits = precision.saturating_sub(TOLERANCE_HEADROOM).max(1) as i64;
    delta_exp < next_exp - tolerance_digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> ScaledDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_perfect_squares() {
        assert_eq!(sqrt(&dec("144"), 20).unwrap().round_to_scale(10), dec("12"));
        assert_eq!(sqrt(&dec("0.25"), 20).unwrap().round_to_scale(10), dec("0.5"));
        assert_eq!(sqrt(&ScaledDecimal::one(), 20).unwrap(), ScaledDecimal::one());
    }

    #[test]
    fn test_sqrt_two() {
        let root = sqrt(&dec("2"), 40).unwrap();
        let expected = dec("1.4142135623730950488016887242096980785697");
        assert_eq!(root.round_to_scale(35), expected.round_to_scale(35));
    }

    #[test]
    fn test_sqrt_chudnovsky_constant() {
        let root = sqrt(&dec("10005"), 30).unwrap();
        let expected = dec("100.0249968757810059447921878763577780016");
        assert_eq!(root.round_to_scale(20), expected.round_to_scale(20));
    }

    #[test]
    fn test_sqrt_zero() {
        assert!(sqrt(&ScaledDecimal::zero(), 10).unwrap().is_zero());
    }

    #[test]
    fn test_sqrt_negative_is_invalid() {
        assert_eq!(
            sqrt(&ScaledDecimal::from_integer(-1), 10),
            Err(NumericError::InvalidArgument)
        );
    }

    #[test]
    fn test_sqrt_extreme_magnitudes() {
        let large = sqrt(&dec("1e40"), 25).unwrap();
        assert_eq!(large.round_to_scale(0), dec("1e20"));

        let small = sqrt(&dec("1e-40"), 25).unwrap();
        assert_eq!(small.round_to_scale(30), dec("1e-20"));
    }

    #[test]
    fn test_method_delegates() {
        let x = dec("9");
        assert_eq!(x.sqrt(15).unwrap().round_to_scale(8), dec("3"));
    }
}
