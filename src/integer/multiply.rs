// ============================================================================
// Multiplication and Squaring
// Schoolbook, Karatsuba and Toom-Cook-3 tiers selected by operand size
// ============================================================================

use crate::integer::big_integer::{BigInteger, MAX_MAG_LENGTH};
use crate::integer::words::{
    self, add_one, add_wide, mul_add, primitive_shift_left, strip_leading_zeros_vec,
};
use crate::interfaces::MultiplyStrategy;
use crate::numeric::{NumericError, NumericResult};

/// Operands at or above this many words (both of them) use Karatsuba.
pub const KARATSUBA_THRESHOLD: usize = 80;

/// Operands at or above this many words (both of them) use Toom-Cook-3.
pub const TOOM_COOK_THRESHOLD: usize = 240;

/// Squaring switches to Karatsuba at this many words.
pub const KARATSUBA_SQUARE_THRESHOLD: usize = 128;

/// Squaring switches to Toom-Cook-3 at this many words.
pub const TOOM_COOK_SQUARE_THRESHOLD: usize = 216;

/// Multiplication algorithm tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MultiplyTier {
    /// Quadratic word-by-word product
    Schoolbook,
    /// Three half-size products
    Karatsuba,
    /// Five third-size products with Bodrato interpolation
    ToomCook3,
}

impl MultiplyTier {
    /// Tier used for `x_words × y_words` word operands.
    #[inline]
    pub fn for_product(x_words: usize, y_words: usize) -> Self {
        if x_words < KARATSUBA_THRESHOLD || y_words < KARATSUBA_THRESHOLD {
            MultiplyTier::Schoolbook
        } else if x_words < TOOM_COOK_THRESHOLD && y_words < TOOM_COOK_THRESHOLD {
            MultiplyTier::Karatsuba
        } else {
            MultiplyTier::ToomCook3
        }
    }

    /// Tier used to square a `words`-word operand.
    #[inline]
    pub fn for_square(words: usize) -> Self {
        if words < KARATSUBA_SQUARE_THRESHOLD {
            MultiplyTier::Schoolbook
        } else if words < TOOM_COOK_SQUARE_THRESHOLD {
            MultiplyTier::Karatsuba
        } else {
            MultiplyTier::ToomCook3
        }
    }

    /// The strategy implementing this tier.
    pub fn strategy(self) -> &'static dyn MultiplyStrategy {
        match self {
            MultiplyTier::Schoolbook => &Schoolbook,
            MultiplyTier::Karatsuba => &Karatsuba,
            MultiplyTier::ToomCook3 => &ToomCook3,
        }
    }
}

impl std::fmt::Display for MultiplyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.strategy().name())
    }
}

/// Select the multiplication strategy for the given operand sizes.
///
/// # Example
/// ```
/// use precise_decimal::integer::select_multiplier;
///
/// assert_eq!(select_multiplier(10, 500).name(), "schoolbook");
/// assert_eq!(select_multiplier(100, 100).name(), "karatsuba");
/// assert_eq!(select_multiplier(100, 300).name(), "toom-cook-3");
/// ```
pub fn select_multiplier(x_words: usize, y_words: usize) -> &'static dyn MultiplyStrategy {
    let tier = MultiplyTier::for_product(x_words, y_words);
    if tier != MultiplyTier::Schoolbook {
        tracing::trace!(x_words, y_words, tier = %tier, "selected multiplication tier");
    }
    tier.strategy()
}

/// Select the squaring strategy for an operand of `words` words.
pub fn select_squarer(words: usize) -> &'static dyn MultiplyStrategy {
    let tier = MultiplyTier::for_square(words);
    if tier != MultiplyTier::Schoolbook {
        tracing::trace!(words, tier = %tier, "selected squaring tier");
    }
    tier.strategy()
}

// ============================================================================
// BigInteger Entry Points
// ============================================================================

impl BigInteger {
    /// Checked multiplication
    pub fn multiply(&self, other: &Self) -> NumericResult<Self> {
        if self.signum == 0 || other.signum == 0 {
            return Ok(Self::zero());
        }
        if self.mag.len() + other.mag.len() > MAX_MAG_LENGTH + 1 {
            return Err(NumericError::BitLengthOverflow);
        }
        self.multiply_unchecked(other).check_range()
    }

    /// Checked squaring
    pub fn square(&self) -> NumericResult<Self> {
        if self.signum == 0 {
            return Ok(Self::zero());
        }
        if 2 * self.mag.len() > MAX_MAG_LENGTH + 1 {
            return Err(NumericError::BitLengthOverflow);
        }
        self.square_unchecked().check_range()
    }

    pub(crate) fn multiply_unchecked(&self, other: &Self) -> Self {
        if self.signum == 0 || other.signum == 0 {
            return Self::zero();
        }
        if std::ptr::eq(self, other) {
            return self.square_unchecked();
        }
        select_multiplier(self.mag.len(), other.mag.len()).multiply(self, other)
    }

    pub(crate) fn square_unchecked(&self) -> Self {
        if self.signum == 0 {
            return Self::zero();
        }
        select_squarer(self.mag.len()).square(self)
    }

    /// The low `n` words as a nonnegative value.
    fn lower_words(&self, n: usize) -> Self {
        let len = self.mag.len();
        if len <= n {
            return self.abs();
        }
        Self::from_magnitude(1, self.mag[len - n..].to_vec())
    }

    /// Everything above the low `n` words as a nonnegative value.
    fn upper_words(&self, n: usize) -> Self {
        let len = self.mag.len();
        if len <= n {
            return Self::zero();
        }
        Self::from_stripped(1, self.mag[..len - n].to_vec())
    }

    /// One of the three Toom-Cook slices of a magnitude padded to `full`
    /// words: slice 0 holds the top `upper` words, slices 1 and 2 hold
    /// `lower` words each.
    fn toom_slice(&self, lower: usize, upper: usize, slice: usize, full: usize) -> Self {
        let len = self.mag.len() as isize;
        let offset = full as isize - len;
        let (start, end) = if slice == 0 {
            (-offset, upper as isize - 1 - offset)
        } else {
            let start = upper as isize + (slice as isize - 1) * lower as isize - offset;
            (start, start + lower as isize - 1)
        };
        let start = start.max(0);
        if end < 0 || end < start {
            return Self::zero();
        }
        let (start, size) = (start as usize, (end - start + 1) as usize);
        if start == 0 && size >= self.mag.len() {
            return self.abs();
        }
        Self::from_magnitude(1, self.mag[start..start + size].to_vec())
    }

    fn exact_divide_by_3(&self) -> Self {
        Self::from_stripped(self.signum, words::exact_divide_by_3(&self.mag))
    }

    fn with_sign(self, negative: bool) -> Self {
        if negative {
            -self
        } else {
            self
        }
    }
}

// ============================================================================
// Schoolbook
// ============================================================================

/// Quadratic multiplication, used below the Karatsuba thresholds.
pub struct Schoolbook;

impl MultiplyStrategy for Schoolbook {
    fn multiply(&self, x: &BigInteger, y: &BigInteger) -> BigInteger {
        BigInteger::from_stripped(x.signum * y.signum, multiply_to_len(&x.mag, &y.mag))
    }

    fn square(&self, x: &BigInteger) -> BigInteger {
        BigInteger::from_stripped(1, square_to_len(&x.mag))
    }

    fn name(&self) -> &'static str {
        "schoolbook"
    }
}

/// Full product of two magnitudes.
pub(crate) fn multiply_to_len(x: &[u32], y: &[u32]) -> Vec<u32> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }
    let mut z = vec![0u32; x.len() + y.len()];
    for (i, &xi) in x.iter().enumerate().rev() {
        let xi = u64::from(xi);
        let mut carry = 0u64;
        for (j, &yj) in y.iter().enumerate().rev() {
            let product = xi * u64::from(yj) + u64::from(z[i + j + 1]) + carry;
            z[i + j + 1] = product as u32;
            carry = product >> 32;
        }
        z[i] = carry as u32;
    }
    strip_leading_zeros_vec(z)
}

/// Square of a magnitude: off-diagonal products once, doubled, plus the
/// diagonal squares.
pub(crate) fn square_to_len(x: &[u32]) -> Vec<u32> {
    let len = x.len();
    if len == 0 {
        return Vec::new();
    }
    let mut z = vec![0u32; 2 * len];

    // x[i] * x[j] for j > i lands with its low word at z[i + j + 1]
    for i in 0..len - 1 {
        let carry = mul_add(&mut z[2 * i + 2..i + len + 1], &x[i + 1..], x[i]);
        add_one(&mut z[..2 * i + 2], carry);
    }

    primitive_shift_left(&mut z, 1);

    for (i, &xi) in x.iter().enumerate() {
        let square = u64::from(xi) * u64::from(xi);
        add_wide(&mut z[..2 * i + 2], square);
    }
    strip_leading_zeros_vec(z)
}

// ============================================================================
// Karatsuba
// ============================================================================

/// Karatsuba: three half-size products instead of four.
pub struct Karatsuba;

impl MultiplyStrategy for Karatsuba {
    fn multiply(&self, x: &BigInteger, y: &BigInteger) -> BigInteger {
        let half = (x.mag.len().max(y.mag.len()) + 1) / 2;

        let (xl, xh) = (x.lower_words(half), x.upper_words(half));
        let (yl, yh) = (y.lower_words(half), y.upper_words(half));

        let p1 = xh.multiply_unchecked(&yh);
        let p2 = xl.multiply_unchecked(&yl);
        let p3 = xh
            .add_unchecked(&xl)
            .multiply_unchecked(&yh.add_unchecked(&yl));

        // p1 * 2^(64 half) + (p3 - p1 - p2) * 2^(32 half) + p2
        let shift = 32 * half;
        let middle = p3.sub_unchecked(&p1).sub_unchecked(&p2);
        p1.shl_bits(shift)
            .add_unchecked(&middle)
            .shl_bits(shift)
            .add_unchecked(&p2)
            .with_sign(x.signum != y.signum)
    }

    fn square(&self, x: &BigInteger) -> BigInteger {
        let half = (x.mag.len() + 1) / 2;
        let (xl, xh) = (x.lower_words(half), x.upper_words(half));

        let xhs = xh.square_unchecked();
        let xls = xl.square_unchecked();

        // xh^2 * 2^(64 half) + ((xl + xh)^2 - (xh^2 + xl^2)) * 2^(32 half) + xl^2
        let shift = 32 * half;
        let middle = xl.add_unchecked(&xh).square_unchecked().sub_unchecked(&xhs.add_unchecked(&xls));
        xhs.shl_bits(shift)
            .add_unchecked(&middle)
            .shl_bits(shift)
            .add_unchecked(&xls)
    }

    fn name(&self) -> &'static str {
        "karatsuba"
    }
}

// ============================================================================
// Toom-Cook-3
// ============================================================================

/// Three-way Toom-Cook with Bodrato's interpolation sequence.
pub struct ToomCook3;

impl MultiplyStrategy for ToomCook3 {
    fn multiply(&self, x: &BigInteger, y: &BigInteger) -> BigInteger {
        let largest = x.mag.len().max(y.mag.len());
        if largest < 3 {
            return Schoolbook.multiply(x, y);
        }

        // k is the lower-order slice size, r the (possibly smaller) top slice
        let k = (largest + 2) / 3;
        let r = largest - 2 * k;

        let a2 = x.toom_slice(k, r, 0, largest);
        let a1 = x.toom_slice(k, r, 1, largest);
        let a0 = x.toom_slice(k, r, 2, largest);
        let b2 = y.toom_slice(k, r, 0, largest);
        let b1 = y.toom_slice(k, r, 1, largest);
        let b0 = y.toom_slice(k, r, 2, largest);

        // evaluation at 0, 1, -1, 2 and infinity
        let v0 = a0.multiply_unchecked(&b0);
        let mut da1 = a2.add_unchecked(&a0);
        let mut db1 = b2.add_unchecked(&b0);
        let vm1 = da1
            .sub_unchecked(&a1)
            .multiply_unchecked(&db1.sub_unchecked(&b1));
        da1 = da1.add_unchecked(&a1);
        db1 = db1.add_unchecked(&b1);
        let v1 = da1.multiply_unchecked(&db1);
        let v2 = da1
            .add_unchecked(&a2)
            .shl_bits(1)
            .sub_unchecked(&a0)
            .multiply_unchecked(&db1.add_unchecked(&b2).shl_bits(1).sub_unchecked(&b0));
        let vinf = a2.multiply_unchecked(&b2);

        interpolate(v0, v1, vm1, v2, vinf, k).with_sign(x.signum != y.signum)
    }

    fn square(&self, x: &BigInteger) -> BigInteger {
        let len = x.mag.len();
        if len < 3 {
            return Schoolbook.square(x);
        }

        let k = (len + 2) / 3;
        let r = len - 2 * k;

        let a2 = x.toom_slice(k, r, 0, len);
        let a1 = x.toom_slice(k, r, 1, len);
        let a0 = x.toom_slice(k, r, 2, len);

        let v0 = a0.square_unchecked();
        let mut da1 = a2.add_unchecked(&a0);
        let vm1 = da1.sub_unchecked(&a1).square_unchecked();
        da1 = da1.add_unchecked(&a1);
        let v1 = da1.square_unchecked();
        let vinf = a2.square_unchecked();
        let v2 = da1
            .add_unchecked(&a2)
            .shl_bits(1)
            .sub_unchecked(&a0)
            .square_unchecked();

        interpolate(v0, v1, vm1, v2, vinf, k)
    }

    fn name(&self) -> &'static str {
        "toom-cook-3"
    }
}

/// Recovers the five coefficients from the point values and recombines
/// them with `k`-word shifts.
fn interpolate(
    v0: BigInteger,
    v1: BigInteger,
    vm1: BigInteger,
    v2: BigInteger,
    vinf: BigInteger,
    k: usize,
) -> BigInteger {
    let mut t2 = v2.sub_unchecked(&vm1).exact_divide_by_3();
    let mut tm1 = v1.sub_unchecked(&vm1).shr_bits(1);
    let mut t1 = v1.sub_unchecked(&v0);
    t2 = t2.sub_unchecked(&t1).shr_bits(1);
    t1 = t1.sub_unchecked(&tm1).sub_unchecked(&vinf);
    t2 = t2.sub_unchecked(&vinf.shl_bits(1));
    tm1 = tm1.sub_unchecked(&t2);

    let shift = 32 * k;
    vinf.shl_bits(shift)
        .add_unchecked(&t2)
        .shl_bits(shift)
        .add_unchecked(&t1)
        .shl_bits(shift)
        .add_unchecked(&tm1)
        .shl_bits(shift)
        .add_unchecked(&v0)
}
