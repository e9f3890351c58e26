// ============================================================================
// Decimal Division
// Exact, scaled, context-rounded and integral division
// ============================================================================

use crate::context::{MathContext, RoundingMode};
use crate::decimal::big_decimal::{check_scale_nonzero, saturate_scale, BigDecimal};
use crate::decimal::rounding::{divide_and_round, scaled_divide, strip_zeros_to_match_scale};
use crate::decimal::unscaled::Unscaled;
use crate::numeric::{NumericError, NumericResult};
use std::cmp::Ordering;

fn check_divisor(dividend: &BigDecimal, divisor: &BigDecimal) -> NumericResult<()> {
    if !divisor.is_zero() {
        return Ok(());
    }
    if dividend.is_zero() {
        Err(NumericError::DivisionUndefined)
    } else {
        Err(NumericError::DivisionByZero)
    }
}

/// Compares `x × 10^-x_digits` with `y × 10^-y_digits`, i.e. both
/// coefficients read as fractions in `[0.1, 1)`.
fn compare_normalized(x: &Unscaled, x_digits: i64, y: &Unscaled, y_digits: i64) -> Ordering {
    let diff = x_digits - y_digits;
    match diff.cmp(&0) {
        Ordering::Equal => x.compare_magnitude(y),
        Ordering::Less => x.scale_up((-diff) as u32).compare_magnitude(y),
        Ordering::Greater => x.compare_magnitude(&y.scale_up(diff as u32)),
    }
}

/// `precision(x) + ceil(10 × precision(y) / 3)`, the digit budget that
/// holds any terminating quotient of `x / y`.
fn exact_quotient_digits(x: &BigDecimal, y: &BigDecimal) -> u64 {
    u64::from(x.precision()) + (u64::from(y.precision()) * 10).div_ceil(3)
}

impl BigDecimal {
    // ========================================================================
    // Division
    // ========================================================================

    /// Exact quotient with preferred scale `self.scale - divisor.scale`.
    ///
    /// Fails with `NonTerminatingDecimalExpansion` when the quotient has no
    /// finite decimal representation.
    ///
    /// # Example
    /// ```
    /// use precise_decimal::{BigDecimal, NumericError};
    ///
    /// let one = BigDecimal::one();
    /// assert_eq!(one.divide(&BigDecimal::from(8)).unwrap().to_string(), "0.125");
    /// assert_eq!(
    ///     one.divide(&BigDecimal::from(3)),
    ///     Err(NumericError::NonTerminatingDecimalExpansion)
    /// );
    /// ```
    pub fn divide(&self, divisor: &Self) -> NumericResult<BigDecimal> {
        check_divisor(self, divisor)?;
        let preferred = saturate_scale(i64::from(self.scale) - i64::from(divisor.scale));
        if self.is_zero() {
            return Ok(BigDecimal::zero_with_scale(preferred));
        }

        let digits = exact_quotient_digits(self, divisor).min(i32::MAX as u64) as u32;
        let mc = MathContext::with_rounding(digits, RoundingMode::Unnecessary);
        let quotient = self
            .divide_with_context(divisor, mc)
            .map_err(|err| match err {
                NumericError::RoundingNecessary => NumericError::NonTerminatingDecimalExpansion,
                other => other,
            })?;

        if preferred > quotient.scale {
            quotient.set_scale(preferred, RoundingMode::Unnecessary)
        } else {
            Ok(quotient)
        }
    }

    /// Quotient at the given scale, rounded under `mode`.
    pub fn divide_with_scale(&self, divisor: &Self, scale: i32, mode: RoundingMode) -> NumericResult<BigDecimal> {
        check_divisor(self, divisor)?;
        if self.is_zero() {
            return Ok(BigDecimal::zero_with_scale(scale));
        }

        let target = check_scale_nonzero(i64::from(scale) + i64::from(divisor.scale))?;
        if target > self.scale {
            // raise the dividend
            let raise = (i64::from(target) - i64::from(self.scale)) as u32;
            scaled_divide(&self.unscaled, raise, &divisor.unscaled, scale, mode, scale)
        } else {
            // raise the divisor
            let divisor_scale = check_scale_nonzero(i64::from(self.scale) - i64::from(scale))?;
            let raise = (i64::from(divisor_scale) - i64::from(divisor.scale)) as u32;
            let scaled_divisor = divisor.unscaled.multiply_power_ten(raise)?;
            divide_and_round(&self.unscaled, &scaled_divisor, scale, mode, scale)
        }
    }

    /// Quotient at the dividend's scale, rounded under `mode`.
    pub fn divide_with_mode(&self, divisor: &Self, mode: RoundingMode) -> NumericResult<BigDecimal> {
        self.divide_with_scale(divisor, self.scale, mode)
    }

    /// Quotient rounded to `mc.precision` significant digits.
    ///
    /// Both coefficients are read as fractions in `[0.1, 1)`; the dividend
    /// is kept below the divisor so a division to exactly `mc.precision`
    /// digits yields the rounded result.
    pub fn divide_with_context(&self, divisor: &Self, mc: MathContext) -> NumericResult<BigDecimal> {
        if mc.is_unlimited() {
            return self.divide(divisor);
        }
        check_divisor(self, divisor)?;
        let preferred = i64::from(self.scale) - i64::from(divisor.scale);
        if self.is_zero() {
            return Ok(BigDecimal::zero_with_scale(saturate_scale(preferred)));
        }

        let x_digits = i64::from(self.precision());
        let mut y_digits = i64::from(divisor.precision());
        if compare_normalized(&self.unscaled, x_digits, &divisor.unscaled, y_digits) == Ordering::Greater {
            // divisor *= 10
            y_digits -= 1;
        }

        let mcp = i64::from(mc.precision());
        let mode = mc.rounding_mode();
        let scale = check_scale_nonzero(preferred + y_digits - x_digits + mcp)?;
        let preferred = check_scale_nonzero(preferred)?;
        let raise = check_scale_nonzero(mcp + y_digits - x_digits)?;
        let quotient = if raise > 0 {
            scaled_divide(&self.unscaled, raise as u32, &divisor.unscaled, scale, mode, preferred)?
        } else {
            let scaled_divisor = divisor.unscaled.multiply_power_ten(raise.unsigned_abs())?;
            divide_and_round(&self.unscaled, &scaled_divisor, scale, mode, preferred)?
        };

        // only a carry to a new leading digit needs another pass
        mc.round(&quotient)
    }

    // ========================================================================
    // Integral Division
    // ========================================================================

    /// Integer part of the exact quotient, with preferred scale
    /// `self.scale - divisor.scale`.
    pub fn divide_to_integral_value(&self, divisor: &Self) -> NumericResult<BigDecimal> {
        check_divisor(self, divisor)?;
        let preferred = saturate_scale(i64::from(self.scale) - i64::from(divisor.scale));
        if self.compare_magnitude(divisor) == Ordering::Less {
            return Ok(BigDecimal::zero_with_scale(preferred));
        }

        let scale_gap = (i64::from(self.scale) - i64::from(divisor.scale)).unsigned_abs();
        let digits = (exact_quotient_digits(self, divisor) + scale_gap + 2).min(i32::MAX as u64) as u32;
        let mut quotient =
            self.divide_with_context(divisor, MathContext::with_rounding(digits, RoundingMode::Down))?;
        if quotient.scale > 0 {
            quotient = quotient.set_scale(0, RoundingMode::Down)?;
            quotient = strip_zeros_to_match_scale(quotient.unscaled, quotient.scale, i64::from(preferred));
        }
        if quotient.scale < preferred {
            quotient = quotient.set_scale(preferred, RoundingMode::Unnecessary)?;
        }
        Ok(quotient)
    }

    /// Integer part of the exact quotient, failing with
    /// `DivisionImpossible` when it needs more than `mc.precision` digits.
    pub fn divide_to_integral_value_with_context(&self, divisor: &Self, mc: MathContext) -> NumericResult<BigDecimal> {
        if mc.is_unlimited() || self.compare_magnitude(divisor) == Ordering::Less {
            return self.divide_to_integral_value(divisor);
        }
        let preferred = saturate_scale(i64::from(self.scale) - i64::from(divisor.scale));

        let mut result =
            self.divide_with_context(divisor, MathContext::with_rounding(mc.precision(), RoundingMode::Down))?;
        if result.scale < 0 {
            // digits were dropped from the integer part
            let product = result.multiply(divisor)?;
            if self.subtract(&product)?.compare_magnitude(divisor) != Ordering::Less {
                return Err(NumericError::DivisionImpossible);
            }
        } else if result.scale > 0 {
            result = result.set_scale(0, RoundingMode::Down)?;
        }

        let precision_diff = i64::from(mc.precision()) - i64::from(result.precision());
        if preferred > result.scale && precision_diff > 0 {
            let widen = precision_diff.min(i64::from(preferred) - i64::from(result.scale));
            result.set_scale((i64::from(result.scale) + widen) as i32, RoundingMode::Unnecessary)
        } else {
            Ok(strip_zeros_to_match_scale(result.unscaled, result.scale, i64::from(preferred)))
        }
    }

    // ========================================================================
    // Remainders
    // ========================================================================

    /// `self - divide_to_integral_value(divisor) × divisor`; takes the sign
    /// of the dividend.
    pub fn remainder(&self, divisor: &Self) -> NumericResult<BigDecimal> {
        self.divide_and_remainder(divisor).map(|(_, remainder)| remainder)
    }

    pub fn remainder_with_context(&self, divisor: &Self, mc: MathContext) -> NumericResult<BigDecimal> {
        self.divide_and_remainder_with_context(divisor, mc)
            .map(|(_, remainder)| remainder)
    }

    /// Integral quotient and remainder.
    ///
    /// # Example
    /// ```
    /// use precise_decimal::BigDecimal;
    ///
    /// let total: BigDecimal = "10.5".parse().unwrap();
    /// let (q, r) = total.divide_and_remainder(&BigDecimal::from(4)).unwrap();
    /// assert_eq!(q.to_string(), "2.0");
    /// assert_eq!(r.to_string(), "2.5");
    /// ```
    pub fn divide_and_remainder(&self, divisor: &Self) -> NumericResult<(BigDecimal, BigDecimal)> {
        let quotient = self.divide_to_integral_value(divisor)?;
        let remainder = self.subtract(&quotient.multiply(divisor)?)?;
        Ok((quotient, remainder))
    }

    pub fn divide_and_remainder_with_context(
        &self,
        divisor: &Self,
        mc: MathContext,
    ) -> NumericResult<(BigDecimal, BigDecimal)> {
        let quotient = self.divide_to_integral_value_with_context(divisor, mc)?;
        let remainder = self.subtract(&quotient.multiply(divisor)?)?;
        Ok((quotient, remainder))
    }
}
