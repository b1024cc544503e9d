// ============================================================================
// Bailey–Borwein–Plouffe Series
// pi = Σ 16^-k (4/(8k+1) − 2/(8k+4) − 1/(8k+5) − 1/(8k+6))
// ============================================================================

use super::series::sum_until_converged;
use crate::domain::{AlgorithmType, WorkingContext};
use crate::interfaces::PiAlgorithm;
use crate::numeric::{NumericError, NumericResult, ScaledDecimal};
use num_bigint::BigInt;

/// Significant digits carried by hex-digit extraction on top of the digits
/// of the position itself
const HEX_GUARD_DIGITS: u64 = 20;

/// Bailey–Borwein–Plouffe base-16 series, ~1.2 decimal digits per term.
#[derive(Debug, Default, Clone, Copy)]
pub struct BbpPi;

impl BbpPi {
    pub fn new() -> Self {
        Self
    }
}

/// Term `k`: `16^-k (4/(8k+1) − 2/(8k+4) − 1/(8k+5) − 1/(8k+6))`
pub fn bbp_term(k: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let eight_k = 8 * k;
    let part = |numerator: i64, offset: u64| {
        ScaledDecimal::from_integer(numerator)
            .checked_div(&ScaledDecimal::from(eight_k + offset), precision)
    };

    let inner = part(4, 1)?
        .sub_rounded(&part(2, 4)?, precision)
        .sub_rounded(&part(1, 5)?, precision)
        .sub_rounded(&part(1, 6)?, precision);

    let scale = num_traits::pow(BigInt::from(16u8), k as usize);
    inner.checked_div(&ScaledDecimal::from_bigint(scale), precision)
}

impl PiAlgorithm for BbpPi {
    fn compute_with_context(&self, ctx: &WorkingContext) -> NumericResult<ScaledDecimal> {
        let precision = ctx.precision();
        let accumulator = sum_until_converged(ctx, |k| bbp_term(k, precision))?;
        tracing::debug!(terms = accumulator.terms(), precision, "bbp complete");
        Ok(ctx.finalize(accumulator.sum()))
    }

    fn kind(&self) -> AlgorithmType {
        AlgorithmType::Bbp
    }

    fn name(&self) -> &str {
        "BBP"
    }
}

// ============================================================================
// Hexadecimal Digit Extraction
// ============================================================================

/// `base^exponent mod modulus` by binary exponentiation.
///
/// An exponent of zero yields `1 mod modulus`.
///
/// # Errors
/// Returns `DivisionByZero` for a zero modulus.
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> NumericResult<u64> {
    if modulus == 0 {
        return Err(NumericError::DivisionByZero);
    }

    let modulus = u128::from(modulus);
    let mut result: u128 = 1 % modulus;
    let mut base = u128::from(base) % modulus;
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exponent >>= 1;
    }

    Ok(result as u64)
}

/// Fractional part of `Σ_k 16^(n−k) / (8k + j)`.
fn hex_series(j: u64, n: u64, precision: u64) -> NumericResult<ScaledDecimal> {
    let mut sum = ScaledDecimal::zero();

    // Left part: 16^(n-k) reduced modulo the denominator keeps every term below one.
    for k in 0..=n {
        let modulus = 8 * k + j;
        let residue = mod_pow(16, n - k, modulus)?;
        let term =
            ScaledDecimal::from(residue).checked_div(&ScaledDecimal::from(modulus), precision)?;
        sum = sum.add_rounded(&term, precision).fractional_part();
    }

    // Right part: the tail shrinks sixteenfold per term.
    let threshold = -(precision as i64);
    let one = ScaledDecimal::one();
    for k in (n + 1)..(n + 1 + 2 * precision) {
        let power = num_traits::pow(BigInt::from(16u8), (k - n) as usize);
        let denominator = ScaledDecimal::from_bigint(power * (8 * k + j));
        let term = one.checked_div(&denominator, precision)?;
        if term.magnitude_exponent().map_or(true, |e| e < threshold) {
            return Ok(sum.fractional_part());
        }
        sum = sum.add_rounded(&term, precision);
    }

    Err(NumericError::ConvergenceFailure)
}

/// Hexadecimal digit of pi at `position` after the point (1-based), computed
/// without the preceding digits.
///
/// # Example
/// ```
/// use pi_engine::engine::bbp::hex_digit;
///
/// // pi = 3.243F6A88...
/// assert_eq!(hex_digit(1).unwrap(), 0x2);
/// assert_eq!(hex_digit(4).unwrap(), 0xF);
/// ```
///
/// # Errors
/// Returns `InvalidArgument` for position 0.
pub fn hex_digit(position: u64) -> NumericResult<u8> {
    if position == 0 {
        return Err(NumericError::InvalidArgument);
    }
    let n = position - 1;
    let precision = HEX_GUARD_DIGITS + position.to_string().len() as u64;

    let s1 = hex_series(1, n, precision)?;
    let s4 = hex_series(4, n, precision)?;
    let s5 = hex_series(5, n, precision)?;
    let s6 = hex_series(6, n, precision)?;

    let combined = &(&(&ScaledDecimal::from_integer(4) * &s1)
        - &(&ScaledDecimal::from_integer(2) * &s4))
        - &(&s5 + &s6);
    let fraction = combined.fractional_part();

    let digit = (&fraction * &ScaledDecimal::from_integer(16)).floor();
    num_traits::ToPrimitive::to_u8(&digit).ok_or(NumericError::Overflow)
}

/// `count` hexadecimal digits starting at `start` (1-based), uppercase.
pub fn hex_digits(start: u64, count: usize) -> NumericResult<String> {
    (start..start + count as u64)
        .map(|position| {
            hex_digit(position)
                .map(|digit| char::from_digit(u32::from(digit), 16).unwrap_or('?'))
        })
        .collect::<NumericResult<String>>()
        .map(|digits| digits.to_ascii_uppercase())
}
