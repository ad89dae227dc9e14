// ============================================================================
// Exact Fraction Library
// Overflow-checked i64 rationals, decimal bridging and fraction text
// ============================================================================

//! # Exact Fraction
//!
//! An exact rational number type with the numerical plumbing around it.
//!
//! ## Features
//!
//! - **Reduced i64 fractions** with overflow-checked arithmetic that never
//!   wraps or saturates
//! - **Best rational approximation** of a decimal within an error bound
//! - **Word-level decimal rounding** over the 96-bit magnitude of
//!   `rust_decimal::Decimal`, with thirteen rounding modes
//! - **Fraction text**: mixed numbers, vulgar fraction glyphs, superscript
//!   and subscript digits, and seven fraction bar glyphs, in both directions
//!
//! ## Example
//!
//! ```rust
//! use exact_fraction::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let format = NumberFormat::invariant();
//!
//! let a = RationalNumber::parse("1 1/2", &format)?;
//! let b = RationalNumber::parse("¾", &format)?;
//! let sum = a.checked_add(b)?;
//! assert_eq!(sum.format("G G/G", &format)?, "2 1/4");
//!
//! let tenth = RationalNumber::approximate(Decimal::new(1, 1), Decimal::new(1, 9))?;
//! assert_eq!(tenth.to_string(), "1/10");
//!
//! let rounded = Decimal::new(2675, 3).round_with_mode(2, RoundingMode::ToEven)?;
//! assert_eq!(rounded, Decimal::new(268, 2));
//! # Ok::<(), NumericError>(())
//! ```

pub mod convert;
pub mod decimal;
pub mod numeric;
pub mod text;

// Re-exports for convenience
pub mod prelude {
    pub use crate::convert::approximate;
    pub use crate::decimal::{DecimalRoundingExt, DecimalWords, RoundingMode};
    pub use crate::numeric::{NumericError, NumericResult, RationalNumber};
    pub use crate::text::{format, parse, try_parse, NumberFormat};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::decimal::round_with_rng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn r(n: i64, d: i64) -> RationalNumber {
        RationalNumber::new(n, d).unwrap()
    }

    #[test]
    fn test_construction_scenarios() {
        let x = RationalNumber::new(6, 4).unwrap();
        assert_eq!((x.numerator(), x.denominator()), (3, 2));

        let y = RationalNumber::new(-1, -2).unwrap();
        assert_eq!((y.numerator(), y.denominator()), (1, 2));
    }

    #[test]
    fn test_parse_scenarios() {
        let locale = NumberFormat::invariant();
        assert_eq!(try_parse("3/4", &locale), Some(r(3, 4)));
        assert_eq!(try_parse("1 1/2", &locale), Some(r(3, 2)));
        assert_eq!(try_parse("¾", &locale), Some(r(3, 4)));
        assert_eq!(try_parse("1//2", &locale), None);
        assert_eq!(parse("1//2", &locale), Err(NumericError::InvalidFormat));
    }

    #[test]
    fn test_approximation_scenario() {
        assert_eq!(approximate(dec("0.1"), dec("0.000000001")).unwrap(), r(1, 10));
    }

    #[test]
    fn test_recipe_scaling() {
        // 2 3/4 cups for 6 servings, scaled to 4 servings
        let locale = NumberFormat::invariant();
        let cups = parse("2 3/4", &locale).unwrap();
        let scaled = cups.checked_mul(r(4, 6)).unwrap();

        assert_eq!(scaled, r(11, 6));
        assert_eq!(format(scaled, "G G/G", &locale).unwrap(), "1 5/6");
        assert_eq!(format(scaled, "G super⁄sub", &locale).unwrap(), "1 ⁵⁄₆");
        assert_eq!(format(scaled, "F3", &locale).unwrap(), "1.833");
    }

    #[test]
    fn test_decimal_bridge() {
        let third = parse("1/3", &NumberFormat::invariant()).unwrap();

        // division to 28 digits, then back through the approximation
        let decimal = third.to_decimal();
        let back = approximate(decimal, dec("0.0000001")).unwrap();
        assert_eq!(back, third);

        // exact intake of a decimal, then exact rounding of the rational
        let price = RationalNumber::try_from(dec("19.99")).unwrap();
        let share = price.checked_div(r(3, 1)).unwrap();
        assert_eq!(share.to_decimal_rounded(2, RoundingMode::ToEven).unwrap(), dec("6.66"));
        assert_eq!(share.to_decimal_rounded(2, RoundingMode::Ceiling).unwrap(), dec("6.67"));
    }

    #[test]
    fn test_rounding_engine_through_decimal() {
        assert_eq!(dec("1.005").round_with_mode(2, RoundingMode::ToEven).unwrap(), dec("1.00"));
        assert_eq!(
            dec("-2.5").round_with_mode(0, RoundingMode::HalfAwayFromZero).unwrap(),
            dec("-3")
        );
        assert_eq!(
            dec("1234.5").round_with_mode(-2, RoundingMode::ToEven).unwrap(),
            dec("1200")
        );

        let words = DecimalWords::from_decimal(dec("0.25"));
        let mut rng = StdRng::seed_from_u64(7);
        let rounded = round_with_rng(words, 1, RoundingMode::RandomTieBreak, &mut rng).unwrap();
        let value = rounded.to_decimal();
        assert!(value == dec("0.2") || value == dec("0.3"));
    }

    #[test]
    fn test_locale_round_trip() {
        let french = NumberFormat::fr_fr();
        let value = parse("1+1/2", &french).unwrap();
        assert_eq!(value, r(3, 2));
        assert_eq!(format(value, "F2", &french).unwrap(), "1,50");

        let german = NumberFormat::de_de();
        assert_eq!(parse("1.234,5", &german).unwrap(), r(2469, 2));
        assert_eq!(format(r(2469, 2), "N1", &german).unwrap(), "1.234,5");
    }

    #[test]
    fn test_errors_surface() {
        assert_eq!(RationalNumber::new(1, 0), Err(NumericError::OutOfRange));
        assert_eq!(RationalNumber::new(i64::MIN, 1), Err(NumericError::OutOfRange));
        assert_eq!(
            RationalNumber::MAX.checked_add(RationalNumber::ONE),
            Err(NumericError::Overflow)
        );
        assert_eq!(RationalNumber::ZERO.inverse(), Err(NumericError::DivisionByZero));
        assert_eq!(
            Decimal::MAX.round_with_mode(-1, RoundingMode::AwayFromZero),
            Err(NumericError::Overflow)
        );
    }
}
