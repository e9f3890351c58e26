// ============================================================================
// Integer Module
// Arbitrary-precision signed integers on 32-bit word magnitudes
// ============================================================================

mod big_integer;
mod bitwise;
mod convert;
mod division;
mod multiply;
mod pow;
mod radix;
pub(crate) mod words;

pub use big_integer::{BigInteger, MAX_BIT_LENGTH, MAX_MAG_LENGTH};
pub use division::div_rem_wide;
pub use multiply::{
    select_multiplier, select_squarer, Karatsuba, MultiplyTier, Schoolbook, ToomCook3,
    KARATSUBA_SQUARE_THRESHOLD, KARATSUBA_THRESHOLD, TOOM_COOK_SQUARE_THRESHOLD,
    TOOM_COOK_THRESHOLD,
};
pub use radix::{MAX_RADIX, MIN_RADIX};
pub(crate) use radix::parse_magnitude;

#[cfg(feature = "serde")]
mod serde_impl {
    use super::BigInteger;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for BigInteger {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for BigInteger {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        }
    }
}
