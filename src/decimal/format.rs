// ============================================================================
// Decimal Formatting
// Scientific, engineering and plain string forms
// ============================================================================

use crate::decimal::big_decimal::BigDecimal;
use std::fmt;

/// Exponent style used when a value needs an exponent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    /// One digit before the point
    Scientific,
    /// Exponent a multiple of three
    Engineering,
}

impl BigDecimal {
    /// Like `Display`, but any exponent is a multiple of three.
    ///
    /// # Example
    /// ```
    /// use precise_decimal::BigDecimal;
    ///
    /// let value: BigDecimal = "12.3E+7".parse().unwrap();
    /// assert_eq!(value.to_string(), "1.23E+8");
    /// assert_eq!(value.to_engineering_string(), "123E+6");
    /// ```
    pub fn to_engineering_string(&self) -> String {
        self.layout(Notation::Engineering)
    }

    /// The value without an exponent field.
    pub fn to_plain_string(&self) -> String {
        let digits = self.unscaled.magnitude_digits();
        let mut out = String::with_capacity(digits.len() + 3);
        if self.is_negative() {
            out.push('-');
        }

        if self.scale <= 0 {
            if self.is_zero() {
                return "0".to_string();
            }
            out.push_str(&digits);
            push_zeros(&mut out, self.scale.unsigned_abs() as usize);
            return out;
        }

        let scale = self.scale as usize;
        if digits.len() > scale {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            out.push_str(integer);
            out.push('.');
            out.push_str(fraction);
        } else {
            out.push_str("0.");
            push_zeros(&mut out, scale - digits.len());
            out.push_str(&digits);
        }
        out
    }

    /// Text form with an exponent when the scale is negative or the
    /// adjusted exponent is below -6.
    fn layout(&self, notation: Notation) -> String {
        let digits = self.unscaled.magnitude_digits();
        let mut out = String::with_capacity(digits.len() + 14);
        if self.is_negative() {
            out.push('-');
        }
        if self.scale == 0 {
            out.push_str(&digits);
            return out;
        }

        let coeff_len = digits.len() as i64;
        let mut adjusted = -i64::from(self.scale) + (coeff_len - 1);

        if self.scale > 0 && adjusted >= -6 {
            let pad = i64::from(self.scale) - coeff_len;
            if pad >= 0 {
                out.push_str("0.");
                push_zeros(&mut out, pad as usize);
                out.push_str(&digits);
            } else {
                let (integer, fraction) = digits.split_at((-pad) as usize);
                out.push_str(integer);
                out.push('.');
                out.push_str(fraction);
            }
            return out;
        }

        match notation {
            Notation::Scientific => {
                out.push_str(&digits[..1]);
                if digits.len() > 1 {
                    out.push('.');
                    out.push_str(&digits[1..]);
                }
            }
            Notation::Engineering => {
                let mut sig = adjusted.rem_euclid(3);
                adjusted -= sig;
                sig += 1;
                if self.is_zero() {
                    match sig {
                        1 => out.push('0'),
                        2 => {
                            out.push_str("0.00");
                            adjusted += 3;
                        }
                        _ => {
                            out.push_str("0.0");
                            adjusted += 3;
                        }
                    }
                } else if sig >= coeff_len {
                    out.push_str(&digits);
                    push_zeros(&mut out, (sig - coeff_len) as usize);
                } else {
                    let (integer, fraction) = digits.split_at(sig as usize);
                    out.push_str(integer);
                    out.push('.');
                    out.push_str(fraction);
                }
            }
        }

        if adjusted != 0 {
            out.push('E');
            if adjusted > 0 {
                out.push('+');
            }
            out.push_str(&adjusted.to_string());
        }
        out
    }
}

fn push_zeros(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('0').take(count));
}

impl fmt::Display for BigDecimal {
    /// Scientific notation, e.g. `1.23E+8`, `0.00123`, `-4E-10`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.layout(Notation::Scientific))
    }
}
