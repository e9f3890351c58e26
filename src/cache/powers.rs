// ============================================================================
// Powers-of-Ten Tables
// Fixed i64 table plus a shared, copy-on-grow BigInteger table
// ============================================================================

use crate::integer::{BigInteger, MAX_BIT_LENGTH};
use crate::numeric::{NumericError, NumericResult};
use parking_lot::RwLock;
use std::sync::{Arc, LazyLock};

/// `10^0 ..= 10^18`, every power of ten that fits in an i64.
pub const LONG_TEN_POWERS: [i64; 19] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

/// Initial length of the BigInteger powers-of-ten table.
pub const BIG_TEN_POWERS_INITIAL_LEN: usize = 19;

/// The table never grows past this many entries; larger powers are
/// computed on demand.
pub const BIG_TEN_POWERS_MAX_LEN: usize = 16 * BIG_TEN_POWERS_INITIAL_LEN;

static BIG_TEN_POWERS: LazyLock<PowerTable> = LazyLock::new(|| {
    PowerTable::new(
        BigInteger::ten(),
        BIG_TEN_POWERS_INITIAL_LEN,
        BIG_TEN_POWERS_MAX_LEN,
    )
});

/// Lazily grown table of `base^0, base^1, ...`.
///
/// Readers clone the current `Arc` snapshot and index it without holding
/// the lock. A writer builds a complete, larger table and only then swaps
/// it in, so no reader ever sees a partially filled entry.
pub struct PowerTable {
    base: BigInteger,
    max_len: usize,
    snapshot: RwLock<Arc<Vec<BigInteger>>>,
}

impl PowerTable {
    pub fn new(base: BigInteger, initial_len: usize, max_len: usize) -> Self {
        let initial_len = initial_len.clamp(1, max_len.max(1));
        let mut powers = Vec::with_capacity(initial_len);
        let mut current = BigInteger::one();
        for _ in 0..initial_len {
            let next = current.multiply_unchecked(&base);
            powers.push(current);
            current = next;
        }
        Self {
            base,
            max_len: max_len.max(initial_len),
            snapshot: RwLock::new(Arc::new(powers)),
        }
    }

    /// Current table snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<Vec<BigInteger>> {
        Arc::clone(&self.snapshot.read())
    }

    /// Number of entries currently published.
    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `base^n`, growing the table when `n` is within its maximum length.
    pub fn get(&self, n: usize) -> BigInteger {
        if n >= self.max_len {
            return self.base.pow_unchecked(n as u32);
        }
        if let Some(power) = self.snapshot().get(n) {
            return power.clone();
        }
        self.grow_to(n)
    }

    fn grow_to(&self, n: usize) -> BigInteger {
        let mut guard = self.snapshot.write();
        // another writer may have grown the table while we waited
        if n >= guard.len() {
            let old_len = guard.len();
            let mut new_len = old_len.max(1) << 1;
            while new_len <= n {
                new_len <<= 1;
            }
            let new_len = new_len.min(self.max_len);

            let mut powers = Vec::with_capacity(new_len);
            powers.extend(guard.iter().cloned());
            while powers.len() < new_len {
                let next = powers[powers.len() - 1].multiply_unchecked(&self.base);
                powers.push(next);
            }
            tracing::debug!(old_len, new_len, "expanded powers table");
            *guard = Arc::new(powers);
        }
        guard[n].clone()
    }
}

/// `10^n` as an i64, when it fits.
#[inline]
pub fn long_ten_power(n: u32) -> Option<i64> {
    LONG_TEN_POWERS.get(n as usize).copied()
}

/// `10^n` as a BigInteger.
///
/// Callers must know the result is within the bit budget, for example
/// because it is no larger than an existing value.
pub fn big_ten_to_the(n: u32) -> BigInteger {
    BIG_TEN_POWERS.get(n as usize)
}

/// `10^n`, refusing powers that would exceed the bit budget.
pub fn checked_big_ten_to_the(n: u32) -> NumericResult<BigInteger> {
    // floor(n * log2(10)) + 1 bits, with log2(10) rounded up
    let bits = u64::from(n) * 3_321_928_095 / 1_000_000_000 + 1;
    if bits > MAX_BIT_LENGTH {
        return Err(NumericError::BitLengthOverflow);
    }
    Ok(big_ten_to_the(n))
}
