// ============================================================================
// Precise Decimal Library
// Arbitrary-precision integers and scaled decimals with correct rounding
// ============================================================================

//! # Precise Decimal
//!
//! Exact, unbounded integer and decimal arithmetic.
//!
//! ## Features
//!
//! - **`BigInteger`**: sign-magnitude integers on 32-bit words, with
//!   two's-complement bitwise operations
//! - **Tiered multiplication**: schoolbook, Karatsuba and Toom-Cook-3 chosen
//!   by operand size, with separate squaring thresholds
//! - **Knuth Algorithm D** long division plus a 128-by-64 bit fast path
//! - **`BigDecimal`**: unscaled value × 10^-scale, stored inline as an i64
//!   whenever it fits
//! - **Eight rounding modes** and a `MathContext` for precision-limited results
//! - **Shared powers-of-ten cache** that is safe to read from any thread
//!
//! ## Example
//!
//! ```rust
//! use precise_decimal::prelude::*;
//!
//! let price: BigDecimal = "19.99".parse().unwrap();
//! let rate: BigDecimal = "0.0825".parse().unwrap();
//!
//! // exact arithmetic keeps every digit
//! let tax = price.multiply(&rate).unwrap();
//! assert_eq!(tax.to_string(), "1.649175");
//!
//! // round to cents
//! let tax = tax.set_scale(2, RoundingMode::HalfEven).unwrap();
//! assert_eq!(tax.to_string(), "1.65");
//!
//! // division to a fixed number of significant digits
//! let third = BigDecimal::one()
//!     .divide_with_context(&BigDecimal::from(3), MathContext::DECIMAL32)
//!     .unwrap();
//! assert_eq!(third.to_string(), "0.3333333");
//!
//! // exact division fails when the expansion does not terminate
//! assert_eq!(
//!     BigDecimal::one().divide(&BigDecimal::from(3)),
//!     Err(NumericError::NonTerminatingDecimalExpansion)
//! );
//! ```

pub mod cache;
pub mod context;
pub mod decimal;
pub mod integer;
pub mod interfaces;
pub mod numeric;
pub mod time;

pub use context::{MathContext, RoundingMode};
pub use decimal::BigDecimal;
pub use integer::BigInteger;
pub use numeric::{NumericError, NumericResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::context::{MathContext, RoundingMode};
    pub use crate::decimal::BigDecimal;
    pub use crate::integer::{BigInteger, MultiplyTier};
    pub use crate::interfaces::MultiplyStrategy;
    pub use crate::numeric::{NumericError, NumericResult};
    pub use crate::time::DurationScaling;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_reference_scenarios() {
        assert_eq!(dec("123").multiply(&dec("456")).unwrap().to_string(), "56088");

        let floor3 = MathContext::with_rounding(3, RoundingMode::Floor);
        let q = dec("19").divide_with_context(&dec("100"), floor3).unwrap();
        assert_eq!((q.unscaled_value(), q.scale()), (BigInteger::from(19), 2));
        let q = dec("21").divide_with_context(&dec("110"), floor3).unwrap();
        assert_eq!((q.unscaled_value(), q.scale()), (BigInteger::from(190), 3));

        assert_eq!(
            dec("1").divide(&dec("3")),
            Err(NumericError::NonTerminatingDecimalExpansion)
        );

        let half_even7 = MathContext::with_rounding(7, RoundingMode::HalfEven);
        assert_eq!(dec("1234567.5").round(half_even7).unwrap().to_string(), "1234568");
        assert_eq!(dec("1234568.5").round(half_even7).unwrap().to_string(), "1234568");

        assert_eq!(
            BigInteger::from(i64::MIN).negate().to_string(),
            "9223372036854775808"
        );
    }

    #[test]
    fn test_compound_interest() {
        // 1000 at 5% for 10 years, rounded to cents
        let principal = dec("1000.00");
        let growth = dec("1.05").pow(10).unwrap();
        let balance = principal
            .multiply(&growth)
            .unwrap()
            .set_scale(2, RoundingMode::HalfEven)
            .unwrap();
        assert_eq!(balance.to_string(), "1628.89");
    }

    #[test]
    fn test_large_values_cross_representations() {
        let factorial = (1..=30).fold(BigDecimal::one(), |acc, n| {
            acc.multiply(&BigDecimal::from(n)).unwrap()
        });
        assert_eq!(factorial.to_string(), "265252859812191058636308480000000");
        assert!(!factorial.is_compact());

        let back = (1..=30).fold(factorial, |acc, n| acc.divide(&BigDecimal::from(n)).unwrap());
        assert!(back.is_identical(&BigDecimal::one()));
        assert!(back.is_compact());
    }

    #[test]
    fn test_integer_tiers_agree() {
        let words = |n: usize, seed: u32| -> BigInteger {
            let mag: Vec<u32> = (0..n as u32)
                .map(|i| i.wrapping_mul(2_654_435_761).wrapping_add(seed) | 1)
                .collect();
            BigInteger::from_words(1, &mag).unwrap()
        };
        let x = words(250, 7);
        let y = words(245, 11);
        let expected = MultiplyTier::Schoolbook.strategy().multiply(&x, &y);
        assert_eq!(MultiplyTier::Karatsuba.strategy().multiply(&x, &y), expected);
        assert_eq!(MultiplyTier::ToomCook3.strategy().multiply(&x, &y), expected);
        assert_eq!(x.multiply(&y).unwrap(), expected);
        let (q, r) = expected.divide_and_remainder(&y).unwrap();
        assert_eq!(q, x);
        assert!(r.is_zero());
    }

    #[test]
    fn test_shared_across_threads() {
        let base = Arc::new(dec("1.000000001"));
        let results: Vec<BigDecimal> = crossbeam::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let base = Arc::clone(&base);
                    scope.spawn(move |_| {
                        let mc = MathContext::DECIMAL64;
                        base.pow_with_context(1000 + i, mc).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        })
        .unwrap();
        for (i, result) in results.iter().enumerate() {
            let single = base.pow_with_context(1000 + i as i32, MathContext::DECIMAL64).unwrap();
            assert!(result.is_identical(&single));
        }
    }
}
