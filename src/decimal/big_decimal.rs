// ============================================================================
// BigDecimal
// Immutable arbitrary-precision decimal: unscaled value × 10^(-scale)
// ============================================================================

use crate::context::MathContext;
use crate::decimal::unscaled::Unscaled;
use crate::integer::BigInteger;
use crate::numeric::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

/// Arbitrary-precision signed decimal number.
///
/// The value is `unscaled × 10^(-scale)`. Coefficients that fit in an i64
/// are stored inline without allocation. The number of significant digits
/// is computed on first use and cached.
///
/// Equality, ordering and hashing are numeric: `2.0 == 2.00`. Use
/// [`BigDecimal::is_identical`] to also compare scales.
///
/// # Example
/// ```
/// use precise_decimal::prelude::*;
///
/// let price: BigDecimal = "19.99".parse().unwrap();
/// let qty = BigDecimal::from(3);
/// let total = price.multiply(&qty).unwrap();
/// assert_eq!(total.to_string(), "59.97");
/// assert_eq!(total.scale(), 2);
/// ```
pub struct BigDecimal {
    pub(crate) unscaled: Unscaled,
    pub(crate) scale: i32,
    /// Cached digit count of the coefficient (0 = not yet computed)
    precision: AtomicU32,
}

impl BigDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    #[inline]
    pub(crate) fn from_parts(unscaled: Unscaled, scale: i32) -> Self {
        Self::with_precision(unscaled, scale, 0)
    }

    #[inline]
    pub(crate) fn with_precision(unscaled: Unscaled, scale: i32, precision: u32) -> Self {
        Self {
            unscaled,
            scale,
            precision: AtomicU32::new(precision),
        }
    }

    /// Create a decimal from an unscaled BigInteger and a scale
    pub fn new(unscaled: BigInteger, scale: i32) -> Self {
        Self::from_parts(Unscaled::from_big(unscaled), scale)
    }

    /// Create a decimal from an unscaled i64 and a scale
    ///
    /// # Example
    /// ```
    /// use precise_decimal::BigDecimal;
    ///
    /// assert_eq!(BigDecimal::from_unscaled(12345, 2).to_string(), "123.45");
    /// ```
    pub fn from_unscaled(unscaled: i64, scale: i32) -> Self {
        Self::from_parts(Unscaled::Compact(unscaled), scale)
    }

    /// Create a decimal and round it to `mc`
    pub fn with_context(unscaled: BigInteger, scale: i32, mc: MathContext) -> NumericResult<Self> {
        mc.round(&Self::new(unscaled, scale))
    }

    /// Zero with scale 0
    #[inline]
    pub fn zero() -> Self {
        Self::with_precision(Unscaled::ZERO, 0, 1)
    }

    /// Zero with the given scale
    #[inline]
    pub fn zero_with_scale(scale: i32) -> Self {
        Self::with_precision(Unscaled::ZERO, scale, 1)
    }

    #[inline]
    pub fn one() -> Self {
        Self::with_precision(Unscaled::Compact(1), 0, 1)
    }

    #[inline]
    pub fn ten() -> Self {
        Self::with_precision(Unscaled::Compact(10), 0, 2)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of digits to the right of the decimal point (negative for
    /// multiples of powers of ten)
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// The unscaled coefficient
    pub fn unscaled_value(&self) -> BigInteger {
        self.unscaled.as_big().into_owned()
    }

    /// Number of significant digits in the coefficient; zero has precision 1.
    pub fn precision(&self) -> u32 {
        let cached = self.precision.load(AtomicOrdering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let computed = self.unscaled.digit_length();
        self.precision.store(computed, AtomicOrdering::Relaxed);
        computed
    }

    /// Digit count if already known, otherwise 0.
    #[inline]
    pub(crate) fn cached_precision(&self) -> u32 {
        self.precision.load(AtomicOrdering::Relaxed)
    }

    /// -1, 0 or 1
    #[inline]
    pub fn signum(&self) -> i32 {
        self.unscaled.signum()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// Whether the coefficient is held inline as an i64.
    #[inline]
    pub fn is_compact(&self) -> bool {
        matches!(self.unscaled, Unscaled::Compact(_))
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Same coefficient and same scale (`2.0` is not identical to `2.00`).
    pub fn is_identical(&self, other: &Self) -> bool {
        self.scale == other.scale && self.unscaled == other.unscaled
    }

    /// Compares absolute values.
    pub fn compare_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let scale_diff = i64::from(self.scale) - i64::from(other.scale);
        if scale_diff == 0 {
            return self.unscaled.compare_magnitude(&other.unscaled);
        }

        // adjusted exponents decide unless they tie
        let x_adjusted = i64::from(self.precision()) - i64::from(self.scale);
        let y_adjusted = i64::from(other.precision()) - i64::from(other.scale);
        match x_adjusted.cmp(&y_adjusted) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        // equal adjusted exponents bound the alignment by the digit counts
        if scale_diff < 0 {
            self.unscaled
                .scale_up(scale_diff.unsigned_abs() as u32)
                .compare_magnitude(&other.unscaled)
        } else {
            self.unscaled
                .compare_magnitude(&other.unscaled.scale_up(scale_diff as u32))
        }
    }
}

// ============================================================================
// Scale Checks
// ============================================================================

/// Narrows a computed scale to i32.
///
/// Out of range is an error for nonzero values; zero clamps to the nearest
/// bound.
pub(crate) fn check_scale(is_zero: bool, scale: i64) -> NumericResult<i32> {
    match i32::try_from(scale) {
        Ok(scale) => Ok(scale),
        Err(_) if is_zero => Ok(if scale > 0 { i32::MAX } else { i32::MIN }),
        Err(_) => Err(scale_error(scale)),
    }
}

/// Narrows a computed scale of a known nonzero value.
#[inline]
pub(crate) fn check_scale_nonzero(scale: i64) -> NumericResult<i32> {
    i32::try_from(scale).map_err(|_| scale_error(scale))
}

/// Clamps a preferred scale into the i32 range.
#[inline]
pub(crate) fn saturate_scale(scale: i64) -> i32 {
    scale.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn scale_error(scale: i64) -> NumericError {
    if scale > 0 {
        NumericError::Underflow
    } else {
        NumericError::Overflow
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Clone for BigDecimal {
    fn clone(&self) -> Self {
        Self {
            unscaled: self.unscaled.clone(),
            scale: self.scale,
            precision: AtomicU32::new(self.precision.load(AtomicOrdering::Relaxed)),
        }
    }
}

impl Default for BigDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BigDecimal({}, unscaled={}, scale={})",
            self, self.unscaled, self.scale
        )
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (x_sign, y_sign) = (self.signum(), other.signum());
        if x_sign != y_sign {
            return x_sign.cmp(&y_sign);
        }
        if x_sign == 0 {
            return Ordering::Equal;
        }
        if let (Unscaled::Compact(x), Unscaled::Compact(y)) = (&self.unscaled, &other.unscaled) {
            if self.scale == other.scale {
                return x.cmp(y);
            }
        }
        let by_magnitude = self.compare_magnitude(other);
        if x_sign > 0 {
            by_magnitude
        } else {
            by_magnitude.reverse()
        }
    }
}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for BigDecimal {
    /// Hashes the value with trailing zeros stripped, so numerically equal
    /// decimals hash alike.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.strip_trailing_zeros();
        normalized.unscaled.hash(state);
        normalized.scale.hash(state);
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

// Infallible Add/Sub/Mul for ergonomics (panics on scale overflow - use the checked methods in production)
impl Add for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, rhs: Self) -> BigDecimal {
        BigDecimal::add(self, rhs).expect("BigDecimal addition overflow")
    }
}

impl Sub for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, rhs: Self) -> BigDecimal {
        self.subtract(rhs).expect("BigDecimal subtraction overflow")
    }
}

impl Mul for &BigDecimal {
    type Output = BigDecimal;

    fn mul(self, rhs: Self) -> BigDecimal {
        self.multiply(rhs).expect("BigDecimal multiplication overflow")
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        self.negate()
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        self.negate()
    }
}
