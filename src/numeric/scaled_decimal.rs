// ============================================================================
// Scaled Decimal
// Arbitrary-precision decimal arithmetic with explicit half-up rounding
// ============================================================================

use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Arbitrary-precision decimal number.
///
/// Internally stores `mantissa × 10^(-scale)` with an unbounded `BigInt`
/// mantissa. Unlike a fixed-point type the scale is a runtime value, and
/// precision is expressed in *significant digits*: every rounding operation
/// takes the working precision of the current computation.
///
/// Exact operations (`+`, `-`, `*`, negation) never round; the `*_rounded`
/// methods and all division/power operations round half-up (ties away from
/// zero) to the supplied precision.
///
/// # Example
/// ```
/// use pi_engine::numeric::ScaledDecimal;
///
/// let one = ScaledDecimal::one();
/// let three = ScaledDecimal::from_integer(3);
/// let third = one.checked_div(&three, 5).unwrap();
/// assert_eq!(third.to_string(), "0.33333");
/// ```
#[derive(Clone)]
pub struct ScaledDecimal {
    mantissa: BigInt,
    scale: i64,
}

// ============================================================================
// Integer Helpers
// ============================================================================

/// Compute 10^n as a big integer
pub(crate) fn pow10(n: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), n as usize)
}

/// Number of decimal digits in the magnitude of `value` (zero has one digit)
fn digit_count(value: &BigInt) -> u64 {
    if value.is_zero() {
        return 1;
    }
    value.magnitude().to_str_radix(10).len() as u64
}

/// Integer division rounding half away from zero. `divisor` must be positive.
fn div_half_up(numerator: &BigInt, divisor: &BigInt) -> BigInt {
    let (quotient, remainder) = numerator.div_rem(divisor);
    let twice_remainder: BigInt = remainder.abs() * 2u32;
    if twice_remainder >= *divisor {
        if numerator.is_negative() {
            quotient - BigInt::one()
        } else {
            quotient + BigInt::one()
        }
    } else {
        quotient
    }
}

impl ScaledDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a raw mantissa and scale: the value is `mantissa × 10^(-scale)`.
    pub fn new(mantissa: impl Into<BigInt>, scale: i64) -> Self {
        Self {
            mantissa: mantissa.into(),
            scale,
        }
    }

    /// Zero
    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// One (1)
    pub fn one() -> Self {
        Self::new(1, 0)
    }

    /// Create from an integer value.
    pub fn from_integer(value: i64) -> Self {
        Self::new(value, 0)
    }

    /// Create from an exact big integer. No rounding is applied.
    pub fn from_bigint(value: BigInt) -> Self {
        Self::new(value, 0)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The unscaled integer mantissa.
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point (negative for values that
    /// carry implicit trailing zeros).
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Number of significant digits held in the mantissa.
    pub fn significant_digits(&self) -> u64 {
        digit_count(&self.mantissa)
    }

    /// Decimal exponent of the leading digit: `e` such that
    /// `10^e <= |self| < 10^(e+1)`. `None` for zero.
    pub fn magnitude_exponent(&self) -> Option<i64> {
        if self.mantissa.is_zero() {
            None
        } else {
            Some(digit_count(&self.mantissa) as i64 - 1 - self.scale)
        }
    }

    /// Check if value is zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Check if value is negative.
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Check if value is positive.
    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.mantissa.abs(), self.scale)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round half-up to at most `precision` significant digits.
    ///
    /// A precision of zero leaves the value untouched.
    pub fn round_to_precision(&self, precision: u64) -> Self {
        let digits = digit_count(&self.mantissa);
        if precision == 0 || digits <= precision {
            return self.clone();
        }

        let dropped = digits - precision;
        let mut mantissa = div_half_up(&self.mantissa, &pow10(dropped));
        let mut scale = self.scale - dropped as i64;

        // A carry (e.g. 999 -> 1000) adds a trailing zero we can drop exactly.
        if digit_count(&mantissa) > precision {
            mantissa /= BigInt::from(10u8);
            scale -= 1;
        }

        Self { mantissa, scale }
    }

    /// Round half-up to exactly `scale` digits after the decimal point.
    pub fn round_to_scale(&self, scale: i64) -> Self {
        match self.scale.cmp(&scale) {
            Ordering::Equal => self.clone(),
            Ordering::Less => Self {
                mantissa: &self.mantissa * pow10((scale - self.scale) as u64),
                scale,
            },
            Ordering::Greater => Self {
                mantissa: div_half_up(&self.mantissa, &pow10((self.scale - scale) as u64)),
                scale,
            },
        }
    }

    /// Truncate (toward zero) to exactly `scale` digits after the decimal point.
    pub fn truncate_to_scale(&self, scale: i64) -> Self {
        match self.scale.cmp(&scale) {
            Ordering::Greater => Self {
                mantissa: &self.mantissa / pow10((self.scale - scale) as u64),
                scale,
            },
            _ => self.round_to_scale(scale),
        }
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> BigInt {
        if self.scale <= 0 {
            &self.mantissa * pow10(self.scale.unsigned_abs())
        } else {
            self.mantissa.div_floor(&pow10(self.scale as u64))
        }
    }

    /// `self - floor(self)`, always in `[0, 1)`.
    pub fn fractional_part(&self) -> Self {
        self - &Self::from_bigint(self.floor())
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Addition rounded to `precision` significant digits.
    pub fn add_rounded(&self, rhs: &Self, precision: u64) -> Self {
        (self + rhs).round_to_precision(precision)
    }

    /// Subtraction rounded to `precision` significant digits.
    pub fn sub_rounded(&self, rhs: &Self, precision: u64) -> Self {
        (self - rhs).round_to_precision(precision)
    }

    /// Multiplication rounded to `precision` significant digits.
    pub fn mul_rounded(&self, rhs: &Self, precision: u64) -> Self {
        (self * rhs).round_to_precision(precision)
    }

    /// Division correctly rounded half-up to `precision` significant digits.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `InvalidArgument` if `precision` is zero
    pub fn checked_div(&self, rhs: &Self, precision: u64) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if precision == 0 {
            return Err(NumericError::InvalidArgument);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        // Shift the dividend so the truncated quotient carries at least
        // precision + 1 digits; the single half-up rounding below then sees
        // every digit that can influence it.
        let shift = (precision + 1 + digit_count(&rhs.mantissa))
            .saturating_sub(digit_count(&self.mantissa));
        let quotient = (&self.mantissa * pow10(shift)) / &rhs.mantissa;

        let raw = Self {
            mantissa: quotient,
            scale: self.scale - rhs.scale + shift as i64,
        };
        Ok(raw.round_to_precision(precision))
    }

    /// Integer power by repeated squaring, rounding every product to
    /// `precision` significant digits.
    ///
    /// # Errors
    /// Returns `UnsupportedOperation` for negative exponents.
    pub fn checked_pow(&self, exponent: i64, precision: u64) -> NumericResult<Self> {
        if exponent < 0 {
            return Err(NumericError::UnsupportedOperation);
        }

        let mut result = Self::one();
        let mut base = self.round_to_precision(precision);
        let mut remaining = exponent as u64;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul_rounded(&base, precision);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul_rounded(&base, precision);
            }
        }

        Ok(result)
    }

    /// Square root rounded to `precision` significant digits.
    ///
    /// See [`crate::numeric::sqrt`].
    pub fn sqrt(&self, precision: u64) -> NumericResult<Self> {
        super::sqrt::sqrt(self, precision)
    }

    /// Bring both mantissas to the larger of the two scales.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, i64) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.mantissa.clone(), other.mantissa.clone(), self.scale),
            Ordering::Less => (
                &self.mantissa * pow10((other.scale - self.scale) as u64),
                other.mantissa.clone(),
                other.scale,
            ),
            Ordering::Greater => (
                self.mantissa.clone(),
                &other.mantissa * pow10((self.scale - other.scale) as u64),
                self.scale,
            ),
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for ScaledDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for ScaledDecimal {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<u64> for ScaledDecimal {
    fn from(value: u64) -> Self {
        Self::new(value, 0)
    }
}

impl From<BigInt> for ScaledDecimal {
    fn from(value: BigInt) -> Self {
        Self::from_bigint(value)
    }
}

impl PartialEq for ScaledDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScaledDecimal {}

impl PartialOrd for ScaledDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScaledDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.mantissa.cmp(&other.mantissa);
        }
        let (lhs, rhs, _) = self.aligned(other);
        lhs.cmp(&rhs)
    }
}

impl Add<&ScaledDecimal> for &ScaledDecimal {
    type Output = ScaledDecimal;

    fn add(self, rhs: &ScaledDecimal) -> ScaledDecimal {
        let (lhs, rhs, scale) = self.aligned(rhs);
        ScaledDecimal::new(lhs + rhs, scale)
    }
}

impl Add for ScaledDecimal {
    type Output = ScaledDecimal;

    fn add(self, rhs: ScaledDecimal) -> ScaledDecimal {
        &self + &rhs
    }
}

impl Sub<&ScaledDecimal> for &ScaledDecimal {
    type Output = ScaledDecimal;

    fn sub(self, rhs: &ScaledDecimal) -> ScaledDecimal {
        let (lhs, rhs, scale) = self.aligned(rhs);
        ScaledDecimal::new(lhs - rhs, scale)
    }
}

impl Sub for ScaledDecimal {
    type Output = ScaledDecimal;

    fn sub(self, rhs: ScaledDecimal) -> ScaledDecimal {
        &self - &rhs
    }
}

impl Mul<&ScaledDecimal> for &ScaledDecimal {
    type Output = ScaledDecimal;

    fn mul(self, rhs: &ScaledDecimal) -> ScaledDecimal {
        ScaledDecimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

impl Mul for ScaledDecimal {
    type Output = ScaledDecimal;

    fn mul(self, rhs: ScaledDecimal) -> ScaledDecimal {
        &self * &rhs
    }
}

impl Neg for ScaledDecimal {
    type Output = ScaledDecimal;

    fn neg(self) -> ScaledDecimal {
        ScaledDecimal::new(-self.mantissa, self.scale)
    }
}

impl Neg for &ScaledDecimal {
    type Output = ScaledDecimal;

    fn neg(self) -> ScaledDecimal {
        ScaledDecimal::new(-&self.mantissa, self.scale)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScaledDecimal({}, mantissa={}, scale={})",
            self, self.mantissa, self.scale
        )
    }
}

impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.magnitude().to_str_radix(10);

        if self.scale <= 0 {
            if self.is_zero() {
                return write!(f, "0");
            }
            let zeros = "0".repeat(self.scale.unsigned_abs() as usize);
            return write!(f, "{}{}{}", sign, digits, zeros);
        }

        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        } else {
            write!(f, "{}0.{:0>width$}", sign, digits, width = scale)
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

/// Largest scale magnitude accepted from text
const MAX_PARSED_SCALE: u64 = 1_000_000;

impl std::str::FromStr for ScaledDecimal {
    type Err = NumericError;

    /// Parse from a decimal string, keeping every written digit.
    ///
    /// # Examples
    /// - "123" -> 123 (scale 0)
    /// - "3.14159" -> 3.14159 (scale 5)
    /// - "-0.001" -> -0.001 (scale 3)
    /// - "2.5e-3" -> 0.0025 (scale 4)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        let (body, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent: i64 = s[pos + 1..]
                    .parse()
                    .map_err(|_| NumericError::InvalidInput)?;
                (&s[..pos], exponent)
            },
            None => (s, 0),
        };

        let (is_negative, body) = if let Some(rest) = body.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = body.strip_prefix('+') {
            (false, rest)
        } else {
            (false, body)
        };

        let (int_str, frac_str) = match body.find('.') {
            Some(pos) => (&body[..pos], &body[pos + 1..]),
            None => (body, ""),
        };

        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if !int_str
            .bytes()
            .chain(frac_str.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(NumericError::InvalidInput);
        }

        let magnitude: BigInt = format!("{}{}", int_str, frac_str)
            .parse()
            .map_err(|_| NumericError::InvalidInput)?;
        let mantissa = if is_negative { -magnitude } else { magnitude };

        let scale = i64::try_from(frac_str.len())
            .ok()
            .and_then(|digits| digits.checked_sub(exponent))
            .filter(|scale| scale.unsigned_abs() <= MAX_PARSED_SCALE)
            .ok_or(NumericError::InvalidInput)?;

        Ok(Self { mantissa, scale })
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

/// Largest scale representable by rust_decimal::Decimal
const RUST_DECIMAL_MAX_SCALE: u32 = 28;

impl ScaledDecimal {
    /// Convert from rust_decimal::Decimal. Always exact.
    pub fn from_rust_decimal(d: rust_decimal::Decimal) -> Self {
        Self::new(d.mantissa(), i64::from(d.scale()))
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the value carries more than 28 fractional digits
    /// - `Overflow` if the mantissa does not fit into 96 bits
    pub fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let normalized = if self.scale < 0 {
            self.round_to_scale(0)
        } else {
            self.clone()
        };

        let scale = u32::try_from(normalized.scale).map_err(|_| NumericError::PrecisionLoss)?;
        if scale > RUST_DECIMAL_MAX_SCALE {
            return Err(NumericError::PrecisionLoss);
        }

        let mantissa = normalized
            .mantissa
            .to_i128()
            .ok_or(NumericError::Overflow)?;

        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// Serialization (as decimal strings)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for ScaledDecimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ScaledDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
