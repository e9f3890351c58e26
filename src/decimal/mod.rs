// ============================================================================
// Decimal Module
// Scaled arbitrary-precision decimals with compact and inflated coefficients
// ============================================================================

mod arithmetic;
mod big_decimal;
mod convert;
mod division;
mod format;
mod parse;
mod rounding;
mod unscaled;

pub use arithmetic::MAX_POW_EXPONENT;
pub use big_decimal::BigDecimal;

#[cfg(feature = "serde")]
mod serde_impl {
    use super::BigDecimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for BigDecimal {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for BigDecimal {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        }
    }
}
