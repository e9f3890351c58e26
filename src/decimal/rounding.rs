// ============================================================================
// Decimal Rounding
// Quotient rounding, scale adjustment and precision reduction
// ============================================================================

use crate::cache::{big_ten_to_the, long_ten_power, LONG_TEN_POWERS};
use crate::context::{MathContext, RoundingMode};
use crate::decimal::big_decimal::{check_scale, check_scale_nonzero, BigDecimal};
use crate::decimal::unscaled::Unscaled;
use crate::integer::{div_rem_wide, BigInteger};
use crate::numeric::NumericResult;
use std::cmp::Ordering;
use tracing::trace;

/// Largest number of digits dropped per step on the compact path.
const MAX_COMPACT_DROP: u32 = 18;

// ============================================================================
// Rounded Quotients
// ============================================================================

/// Rounded `dividend / divisor` for operands whose quotient fits in i128.
///
/// Returns the quotient and whether the division was exact.
pub(crate) fn round_quotient_i128(
    dividend: i128,
    divisor: i128,
    mode: RoundingMode,
) -> NumericResult<(Unscaled, bool)> {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder == 0 {
        return Ok((Unscaled::from_i128(quotient), true));
    }
    let sign = if (dividend < 0) != (divisor < 0) { -1 } else { 1 };
    let half = (remainder.unsigned_abs() * 2).cmp(&divisor.unsigned_abs());
    let quotient = if mode.should_increment(sign, half, quotient & 1 != 0)? {
        quotient + i128::from(sign)
    } else {
        quotient
    };
    Ok((Unscaled::from_i128(quotient), false))
}

/// Rounded 128-by-64 bit division.
///
/// Returns `None` when the quotient magnitude does not fit in 64 bits.
pub(crate) fn round_quotient_wide(
    dividend: i128,
    divisor: i64,
    mode: RoundingMode,
) -> NumericResult<Option<(Unscaled, bool)>> {
    let magnitude = dividend.unsigned_abs();
    let divisor_magnitude = divisor.unsigned_abs();
    let Some((quotient, remainder)) =
        div_rem_wide((magnitude >> 64) as u64, magnitude as u64, divisor_magnitude)
    else {
        return Ok(None);
    };

    let sign: i32 = if (dividend < 0) != (divisor < 0) { -1 } else { 1 };
    let exact = remainder == 0;
    let mut quotient = i128::from(quotient);
    if !exact {
        let half = (u128::from(remainder) * 2).cmp(&u128::from(divisor_magnitude));
        if mode.should_increment(sign, half, quotient & 1 != 0)? {
            quotient += 1;
        }
    }
    let quotient = if sign < 0 { -quotient } else { quotient };
    Ok(Some((Unscaled::from_i128(quotient), exact)))
}

/// Rounded `dividend / divisor` on the inflated path. The divisor must be
/// nonzero.
pub(crate) fn round_quotient_big(
    dividend: &BigInteger,
    divisor: &BigInteger,
    mode: RoundingMode,
) -> NumericResult<(BigInteger, bool)> {
    let (quotient, remainder) = dividend.div_rem_unchecked(divisor);
    if remainder.is_zero() {
        return Ok((quotient, true));
    }
    let sign = dividend.signum() * divisor.signum();
    let half = remainder.shl_bits(1).compare_magnitude(divisor);
    let quotient = if mode.should_increment(sign, half, quotient.test_bit(0))? {
        quotient.add_unchecked(&BigInteger::from(sign))
    } else {
        quotient
    };
    Ok((quotient, false))
}

/// Rounded `x / y` with result scale `scale`. When the division is exact
/// and `scale` differs from `preferred`, trailing zeros are stripped toward
/// `preferred`.
pub(crate) fn divide_and_round(
    x: &Unscaled,
    y: &Unscaled,
    scale: i32,
    mode: RoundingMode,
    preferred: i32,
) -> NumericResult<BigDecimal> {
    let (quotient, exact) = match (x, y) {
        (Unscaled::Compact(a), Unscaled::Compact(b)) => {
            round_quotient_i128(i128::from(*a), i128::from(*b), mode)?
        }
        _ => {
            let (quotient, exact) = round_quotient_big(&x.as_big(), &y.as_big(), mode)?;
            (Unscaled::from_big(quotient), exact)
        }
    };
    Ok(finish_quotient(quotient, exact, scale, preferred))
}

/// Rounded `(x × 10^raise) / y` with result scale `scale`.
pub(crate) fn scaled_divide(
    x: &Unscaled,
    raise: u32,
    y: &Unscaled,
    scale: i32,
    mode: RoundingMode,
    preferred: i32,
) -> NumericResult<BigDecimal> {
    if let (Unscaled::Compact(a), Unscaled::Compact(b), Some(power)) = (x, y, long_ten_power(raise)) {
        let dividend = i128::from(*a) * i128::from(power);
        if let Some((quotient, exact)) = round_quotient_wide(dividend, *b, mode)? {
            return Ok(finish_quotient(quotient, exact, scale, preferred));
        }
        let (quotient, exact) = round_quotient_i128(dividend, i128::from(*b), mode)?;
        return Ok(finish_quotient(quotient, exact, scale, preferred));
    }
    if matches!(x, Unscaled::Compact(_)) && raise > 0 {
        trace!(raise, "scaled dividend exceeds 64 bits, dividing inflated");
    }
    let dividend = x.multiply_power_ten(raise)?;
    divide_and_round(&dividend, y, scale, mode, preferred)
}

fn finish_quotient(quotient: Unscaled, exact: bool, scale: i32, preferred: i32) -> BigDecimal {
    if exact && preferred != scale {
        strip_zeros_to_match_scale(quotient, scale, i64::from(preferred))
    } else {
        BigDecimal::from_parts(quotient, scale)
    }
}

/// Removes trailing zeros while the scale is above `preferred`.
pub(crate) fn strip_zeros_to_match_scale(mut value: Unscaled, mut scale: i32, preferred: i64) -> BigDecimal {
    let ten = Unscaled::Compact(10);
    while i64::from(scale) > preferred
        && scale > i32::MIN
        && value.compare_magnitude(&ten) != Ordering::Less
    {
        value = match &value {
            Unscaled::Compact(v) => {
                if v % 10 != 0 {
                    break;
                }
                Unscaled::Compact(v / 10)
            }
            Unscaled::Big(b) => {
                let (quotient, remainder) = b.div_rem_unchecked(&BigInteger::ten());
                if !remainder.is_zero() {
                    break;
                }
                Unscaled::from_big(quotient)
            }
        };
        scale -= 1;
    }
    BigDecimal::from_parts(value, scale)
}

impl BigDecimal {
    // ========================================================================
    // Precision Reduction
    // ========================================================================

    /// Rounds to at most `precision` significant digits (0 = unchanged).
    pub(crate) fn round_to_precision(&self, precision: u32, mode: RoundingMode) -> NumericResult<BigDecimal> {
        let mut digits = self.precision();
        if precision == 0 || digits <= precision {
            return Ok(self.clone());
        }

        let mut unscaled = self.unscaled.clone();
        let mut scale = i64::from(self.scale);
        while digits > precision {
            let drop = digits - precision;
            unscaled = match &unscaled {
                Unscaled::Compact(v) => {
                    let chunk = drop.min(MAX_COMPACT_DROP);
                    let divisor = LONG_TEN_POWERS[chunk as usize];
                    scale -= i64::from(chunk);
                    round_quotient_i128(i128::from(*v), i128::from(divisor), mode)?.0
                }
                Unscaled::Big(b) => {
                    scale -= i64::from(drop);
                    Unscaled::from_big(round_quotient_big(b, &big_ten_to_the(drop), mode)?.0)
                }
            };
            // a carry can add a digit, e.g. 999 -> 100 at precision 2
            digits = unscaled.digit_length();
        }

        let scale = check_scale_nonzero(scale)?;
        Ok(BigDecimal::with_precision(unscaled, scale, digits))
    }

    /// Rounds to `mc`.
    pub fn round(&self, mc: MathContext) -> NumericResult<BigDecimal> {
        mc.round(self)
    }

    // ========================================================================
    // Scale Adjustment
    // ========================================================================

    /// Returns a value with the given scale.
    ///
    /// Raising the scale is exact. Lowering it divides by a power of ten
    /// under `mode`.
    ///
    /// # Example
    /// ```
    /// use precise_decimal::{BigDecimal, RoundingMode};
    ///
    /// let price: BigDecimal = "2.345".parse().unwrap();
    /// assert_eq!(price.set_scale(2, RoundingMode::HalfEven).unwrap().to_string(), "2.34");
    /// assert_eq!(price.set_scale(5, RoundingMode::Unnecessary).unwrap().to_string(), "2.34500");
    /// ```
    pub fn set_scale(&self, new_scale: i32, mode: RoundingMode) -> NumericResult<BigDecimal> {
        let old_scale = self.scale;
        if new_scale == old_scale {
            return Ok(self.clone());
        }
        if self.is_zero() {
            return Ok(BigDecimal::zero_with_scale(new_scale));
        }

        if new_scale > old_scale {
            let raise = (i64::from(new_scale) - i64::from(old_scale)) as u32;
            let unscaled = self.unscaled.multiply_power_ten(raise)?;
            let precision = match self.cached_precision() {
                0 => 0,
                cached => cached.saturating_add(raise),
            };
            return Ok(BigDecimal::with_precision(unscaled, new_scale, precision));
        }

        let drop = (i64::from(old_scale) - i64::from(new_scale)) as u32;
        if drop > self.precision() {
            // every digit is discarded and the fraction is below one half
            let sign = self.signum();
            let unit = if mode.should_increment(sign, Ordering::Less, false)? {
                i64::from(sign)
            } else {
                0
            };
            return Ok(BigDecimal::from_parts(Unscaled::Compact(unit), new_scale));
        }

        let divisor = match (&self.unscaled, long_ten_power(drop)) {
            (Unscaled::Compact(_), Some(power)) => Unscaled::Compact(power),
            _ => Unscaled::from_big(big_ten_to_the(drop)),
        };
        divide_and_round(&self.unscaled, &divisor, new_scale, mode, new_scale)
    }

    /// `set_scale` that fails with `RoundingNecessary` instead of rounding.
    pub fn set_scale_exact(&self, new_scale: i32) -> NumericResult<BigDecimal> {
        self.set_scale(new_scale, RoundingMode::Unnecessary)
    }

    /// Numerically equal value with all trailing zeros removed from the
    /// coefficient. Zero becomes `0` with scale 0.
    pub fn strip_trailing_zeros(&self) -> BigDecimal {
        if self.is_zero() {
            return BigDecimal::zero();
        }
        strip_zeros_to_match_scale(self.unscaled.clone(), self.scale, i64::MIN)
    }

    // ========================================================================
    // Decimal Point Movement
    // ========================================================================

    /// Moves the decimal point `n` places to the left. The result scale is
    /// never negative.
    pub fn move_point_left(&self, n: i32) -> NumericResult<BigDecimal> {
        if n == 0 {
            return Ok(self.clone());
        }
        self.with_moved_point(i64::from(self.scale) + i64::from(n))
    }

    /// Moves the decimal point `n` places to the right. The result scale is
    /// never negative.
    pub fn move_point_right(&self, n: i32) -> NumericResult<BigDecimal> {
        if n == 0 {
            return Ok(self.clone());
        }
        self.with_moved_point(i64::from(self.scale) - i64::from(n))
    }

    fn with_moved_point(&self, scale: i64) -> NumericResult<BigDecimal> {
        let scale = check_scale(self.is_zero(), scale)?;
        let moved = BigDecimal::with_precision(self.unscaled.clone(), scale, self.cached_precision());
        if moved.scale < 0 {
            moved.set_scale(0, RoundingMode::Unnecessary)
        } else {
            Ok(moved)
        }
    }

    /// `self × 10^n`, by adjusting the scale only.
    pub fn scale_by_power_of_ten(&self, n: i32) -> NumericResult<BigDecimal> {
        let scale = check_scale(self.is_zero(), i64::from(self.scale) - i64::from(n))?;
        Ok(BigDecimal::with_precision(
            self.unscaled.clone(),
            scale,
            self.cached_precision(),
        ))
    }

    /// Size of one unit in the last place, `1 × 10^(-scale)`.
    pub fn ulp(&self) -> BigDecimal {
        BigDecimal::with_precision(Unscaled::Compact(1), self.scale, 1)
    }
}
