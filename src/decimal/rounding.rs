// ============================================================================
// Rounding Engine
// Rescale a DecimalWords magnitude to a target scale under a rounding mode
// ============================================================================

use super::words::{DecimalWords, MAX_POWER_STEP, MAX_SCALE};
use crate::numeric::{NumericError, NumericResult};
use rand::Rng;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest and largest target scale accepted by [`round`].
pub const MIN_TARGET_SCALE: i32 = -28;
pub const MAX_TARGET_SCALE: i32 = 28;

// ============================================================================
// Rounding Mode
// ============================================================================

/// Policy deciding whether a narrowed magnitude is bumped up by one unit.
///
/// "Up" below always means "away from zero in magnitude"; sign-dependent
/// modes look at the sign to pick a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Drop discarded digits
    Truncate,
    /// Drop discarded digits (same as `Truncate`)
    TowardZero,
    /// Round away from zero whenever anything non-zero was discarded
    AwayFromZero,
    /// Round toward positive infinity
    Ceiling,
    /// Round toward negative infinity
    Floor,
    /// Round up with probability `discarded / unit`
    Stochastic,

    /// Nearest, ties to the even neighbour (banker's rounding)
    #[default]
    ToEven,
    /// Nearest, ties to the odd neighbour
    ToOdd,
    /// Nearest, ties away from zero
    HalfAwayFromZero,
    /// Nearest, ties toward zero
    HalfTowardZero,
    /// Nearest, ties toward positive infinity
    HalfUp,
    /// Nearest, ties toward negative infinity
    HalfDown,
    /// Nearest, ties broken by a fair coin
    RandomTieBreak,
}

impl RoundingMode {
    /// True for the round-to-nearest family.
    pub const fn is_nearest(self) -> bool {
        matches!(
            self,
            RoundingMode::ToEven
                | RoundingMode::ToOdd
                | RoundingMode::HalfAwayFromZero
                | RoundingMode::HalfTowardZero
                | RoundingMode::HalfUp
                | RoundingMode::HalfDown
                | RoundingMode::RandomTieBreak
        )
    }

    /// True for the two modes that draw from a random source.
    pub const fn is_randomized(self) -> bool {
        matches!(self, RoundingMode::Stochastic | RoundingMode::RandomTieBreak)
    }
}

// ============================================================================
// Round-up decision
// ============================================================================

/// Digits removed while narrowing a magnitude.
///
/// `remainder / divisor` is the most significant discarded chunk; `sticky`
/// records whether any less significant chunk was non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Discarded {
    pub remainder: u64,
    pub divisor: u64,
    pub sticky: bool,
}

impl Discarded {
    pub const EXACT: Self = Self {
        remainder: 0,
        divisor: 1,
        sticky: false,
    };

    /// Fold in the next, more significant, chunk.
    #[inline]
    pub fn push(self, remainder: u64, divisor: u64) -> Self {
        Self {
            remainder,
            divisor,
            sticky: self.sticky || self.remainder != 0,
        }
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        self.remainder == 0 && !self.sticky
    }

    /// Position of the discarded fraction relative to one half.
    fn cmp_half(self) -> Ordering {
        let doubled = self.remainder as u128 * 2;
        match doubled.cmp(&(self.divisor as u128)) {
            Ordering::Equal if self.sticky => Ordering::Greater,
            ordering => ordering,
        }
    }
}

/// Whether the narrowed magnitude must be incremented.
pub(crate) fn should_round_up<R: Rng + ?Sized>(
    mode: RoundingMode,
    negative: bool,
    odd: bool,
    discarded: Discarded,
    rng: &mut R,
) -> bool {
    if discarded.is_exact() {
        return false;
    }

    match mode {
        RoundingMode::Truncate | RoundingMode::TowardZero => false,
        RoundingMode::AwayFromZero => true,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::Stochastic => rng.gen_range(0..discarded.divisor) < discarded.remainder,
        RoundingMode::ToEven
        | RoundingMode::ToOdd
        | RoundingMode::HalfAwayFromZero
        | RoundingMode::HalfTowardZero
        | RoundingMode::HalfUp
        | RoundingMode::HalfDown
        | RoundingMode::RandomTieBreak => match discarded.cmp_half() {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => match mode {
                RoundingMode::ToEven => odd,
                RoundingMode::ToOdd => !odd,
                RoundingMode::HalfAwayFromZero => true,
                RoundingMode::HalfUp => !negative,
                RoundingMode::HalfDown => negative,
                RoundingMode::RandomTieBreak => rng.gen_bool(0.5),
                _ => false,
            },
        },
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Round to `target_scale` digits after the point using the thread-local
/// random source for the randomized modes.
///
/// See [`round_with_rng`].
pub fn round(
    value: DecimalWords,
    target_scale: i32,
    mode: RoundingMode,
) -> NumericResult<DecimalWords> {
    round_with_rng(value, target_scale, mode, &mut rand::thread_rng())
}

/// Round to `target_scale` digits after the point.
///
/// A negative `target_scale` rounds to tens, hundreds, ... and returns a
/// value at scale 0. A value whose scale is already at or below the target is
/// returned unchanged.
///
/// # Errors
/// - `OutOfRange` if `target_scale` is outside [-28, 28]
/// - `Overflow` if rounding up (or restoring a negative scale) needs more
///   than 96 bits
pub fn round_with_rng<R: Rng + ?Sized>(
    value: DecimalWords,
    target_scale: i32,
    mode: RoundingMode,
    rng: &mut R,
) -> NumericResult<DecimalWords> {
    if !(MIN_TARGET_SCALE..=MAX_TARGET_SCALE).contains(&target_scale) {
        return Err(NumericError::OutOfRange);
    }

    let mut words = value;
    let mut scale_difference = words.scale as i32 - target_scale;
    if scale_difference <= 0 {
        return Ok(words);
    }

    let mut discarded = Discarded::EXACT;
    while scale_difference > 0 {
        let step = scale_difference.min(MAX_POWER_STEP as i32) as u32;
        let (remainder, divisor) = words.div_pow10(step);
        discarded = discarded.push(remainder as u64, divisor as u64);
        scale_difference -= step as i32;
    }

    if should_round_up(mode, words.negative, words.is_odd(), discarded, rng) {
        words.add_small(1).inspect_err(|_| {
            tracing::debug!(?value, target_scale, ?mode, "rounding carry overflowed 96 bits");
        })?;
    }

    if target_scale >= 0 {
        words.scale = target_scale as u8;
    } else {
        words.scale = 0;
        scale_up(&mut words, target_scale.unsigned_abs())?;
    }

    Ok(words)
}

/// Move a value to `new_scale` without rounding.
///
/// # Errors
/// - `OutOfRange` if `new_scale` exceeds 28
/// - `Overflow` if scaling up needs more than 96 bits
/// - `PrecisionLoss` if scaling down would drop a non-zero digit
pub fn rescale(value: DecimalWords, new_scale: u8) -> NumericResult<DecimalWords> {
    if new_scale > MAX_SCALE {
        return Err(NumericError::OutOfRange);
    }

    let mut words = value;
    match new_scale.cmp(&words.scale) {
        Ordering::Equal => {},
        Ordering::Greater => {
            let power = (new_scale - words.scale) as u32;
            scale_up(&mut words, power)?;
        },
        Ordering::Less => {
            let mut power = (words.scale - new_scale) as u32;
            while power > 0 {
                let step = power.min(MAX_POWER_STEP);
                let (remainder, _) = words.div_pow10(step);
                if remainder != 0 {
                    return Err(NumericError::PrecisionLoss);
                }
                power -= step;
            }
        },
    }

    words.scale = new_scale;
    Ok(words)
}

/// Strip trailing zero digits after the point.
pub fn trim(value: DecimalWords) -> DecimalWords {
    let mut words = value;
    while words.scale > 0 {
        let mut probe = words;
        if probe.div_small(10) != 0 {
            break;
        }
        words = probe;
        words.scale -= 1;
    }
    words
}

/// Multiply the magnitude by `10^power`, nine digits at a time.
fn scale_up(words: &mut DecimalWords, mut power: u32) -> NumericResult<()> {
    while power > 0 {
        let step = power.min(MAX_POWER_STEP);
        words.mul_pow10(step)?;
        power -= step;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rounded(s: &str, target: i32, mode: RoundingMode) -> Decimal {
        round(DecimalWords::from_decimal(dec(s)), target, mode)
            .unwrap()
            .to_decimal()
    }

    #[test]
    fn test_bankers_rounding_table() {
        let cases = [
            ("1.005", 2, "1.00"),
            ("1.015", 2, "1.02"),
            ("1.025", 2, "1.02"),
            ("1.035", 2, "1.04"),
            ("2.5", 0, "2"),
            ("3.5", 0, "4"),
            ("-2.5", 0, "-2"),
            ("-3.5", 0, "-4"),
            ("0.5", 0, "0"),
            ("1.006", 2, "1.01"),
            ("1.004", 2, "1.00"),
        ];
        for (input, target, expected) in cases {
            assert_eq!(
                rounded(input, target, RoundingMode::ToEven),
                dec(expected),
                "{input} to {target}"
            );
        }
    }

    #[test]
    fn test_result_scale_is_target() {
        let words = round(DecimalWords::from_decimal(dec("1.23456")), 2, RoundingMode::ToEven)
            .unwrap();
        assert_eq!(words.scale, 2);
        assert_eq!(words.magnitude(), 123);
    }

    #[test]
    fn test_no_rounding_needed() {
        let value = DecimalWords::from_decimal(dec("1.5"));
        let words = round(value, 3, RoundingMode::ToEven).unwrap();
        assert_eq!(words, value);
    }

    #[test]
    fn test_tie_breaks() {
        use RoundingMode::*;
        let cases = [
            (ToOdd, "2.5", "3"),
            (ToOdd, "3.5", "3"),
            (HalfAwayFromZero, "2.5", "3"),
            (HalfAwayFromZero, "-2.5", "-3"),
            (HalfTowardZero, "2.5", "2"),
            (HalfTowardZero, "-2.5", "-2"),
            (HalfUp, "2.5", "3"),
            (HalfUp, "-2.5", "-2"),
            (HalfDown, "2.5", "2"),
            (HalfDown, "-2.5", "-3"),
            (AwayFromZero, "2.5", "3"),
            (AwayFromZero, "-2.5", "-3"),
        ];
        for (mode, input, expected) in cases {
            assert_eq!(rounded(input, 0, mode), dec(expected), "{mode:?} {input}");
        }
    }

    #[test]
    fn test_nearest_family_off_tie() {
        use RoundingMode::*;
        for mode in [ToEven, ToOdd, HalfAwayFromZero, HalfTowardZero, HalfUp, HalfDown, RandomTieBreak] {
            assert_eq!(rounded("2.51", 0, mode), dec("3"), "{mode:?}");
            assert_eq!(rounded("2.49", 0, mode), dec("2"), "{mode:?}");
            assert_eq!(rounded("-2.51", 0, mode), dec("-3"), "{mode:?}");
        }
    }

    #[test]
    fn test_directed_modes() {
        use RoundingMode::*;
        assert_eq!(rounded("1.99", 1, Truncate), dec("1.9"));
        assert_eq!(rounded("-1.99", 1, TowardZero), dec("-1.9"));
        assert_eq!(rounded("1.01", 1, AwayFromZero), dec("1.1"));
        assert_eq!(rounded("-1.01", 1, AwayFromZero), dec("-1.1"));
        assert_eq!(rounded("1.01", 1, Ceiling), dec("1.1"));
        assert_eq!(rounded("-1.09", 1, Ceiling), dec("-1.0"));
        assert_eq!(rounded("1.09", 1, Floor), dec("1.0"));
        assert_eq!(rounded("-1.01", 1, Floor), dec("-1.1"));
        assert_eq!(rounded("1.10", 1, AwayFromZero), dec("1.1"));
    }

    #[test]
    fn test_sticky_digits_across_chunks() {
        // first chunk discards "000000001", second sees an exact half
        assert_eq!(rounded("0.50000000001", 0, RoundingMode::ToEven), dec("1"));
        assert_eq!(rounded("0.50000000000", 0, RoundingMode::ToEven), dec("0"));
        assert_eq!(
            rounded("0.00000000001", 0, RoundingMode::AwayFromZero),
            dec("1")
        );
    }

    #[test]
    fn test_large_scale_difference() {
        let value = "1.2345678901234567890123456789";
        assert_eq!(rounded(value, 0, RoundingMode::ToEven), dec("1"));
        assert_eq!(rounded(value, 12, RoundingMode::ToEven), dec("1.234567890123"));
        assert_eq!(rounded(value, 27, RoundingMode::ToEven), dec("1.234567890123456789012345679"));
    }

    #[test]
    fn test_negative_target_scale() {
        assert_eq!(rounded("1250", -2, RoundingMode::ToEven), dec("1200"));
        assert_eq!(rounded("1350", -2, RoundingMode::ToEven), dec("1400"));
        assert_eq!(rounded("1234.5", -1, RoundingMode::Floor), dec("1230"));
        let words = round(DecimalWords::from_decimal(dec("1234.5")), -1, RoundingMode::Floor)
            .unwrap();
        assert_eq!(words.scale, 0);
    }

    #[test]
    fn test_target_scale_out_of_range() {
        let value = DecimalWords::from_decimal(dec("1.5"));
        assert_eq!(
            round(value, 29, RoundingMode::ToEven),
            Err(NumericError::OutOfRange)
        );
        assert_eq!(
            round(value, -29, RoundingMode::ToEven),
            Err(NumericError::OutOfRange)
        );
    }

    #[test]
    fn test_round_up_overflow() {
        let value = DecimalWords::from_decimal(Decimal::MAX);
        assert_eq!(
            round(value, -1, RoundingMode::AwayFromZero),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_negative_zero_result() {
        let result = rounded("-0.001", 2, RoundingMode::ToEven);
        assert!(result.is_zero());
        assert!(!result.is_sign_negative());
    }

    #[test]
    fn test_stochastic_is_biased_by_remainder() {
        let mut rng = StdRng::seed_from_u64(7);
        let value = DecimalWords::from_decimal(dec("0.3"));
        let mut ups = 0;
        for _ in 0..1000 {
            let words = round_with_rng(value, 0, RoundingMode::Stochastic, &mut rng).unwrap();
            match words.magnitude() {
                0 => {},
                1 => ups += 1,
                other => panic!("unexpected magnitude {other}"),
            }
        }
        assert!((200..400).contains(&ups), "ups = {ups}");
    }

    #[test]
    fn test_stochastic_exact_value_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let value = DecimalWords::from_decimal(dec("4.00"));
        for _ in 0..50 {
            let words = round_with_rng(value, 0, RoundingMode::Stochastic, &mut rng).unwrap();
            assert_eq!(words.magnitude(), 4);
        }
    }

    #[test]
    fn test_random_tie_break_hits_both_neighbours() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = DecimalWords::from_decimal(dec("2.5"));
        let mut seen = [false; 2];
        for _ in 0..200 {
            let words = round_with_rng(value, 0, RoundingMode::RandomTieBreak, &mut rng).unwrap();
            seen[(words.magnitude() - 2) as usize] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_mode_classification() {
        assert!(RoundingMode::ToEven.is_nearest());
        assert!(!RoundingMode::Ceiling.is_nearest());
        assert!(RoundingMode::Stochastic.is_randomized());
        assert!(RoundingMode::RandomTieBreak.is_randomized());
        assert!(!RoundingMode::Floor.is_randomized());
        assert_eq!(RoundingMode::default(), RoundingMode::ToEven);
    }

    #[test]
    fn test_rescale() {
        let up = rescale(DecimalWords::from_decimal(dec("1.5")), 3).unwrap();
        assert_eq!((up.magnitude(), up.scale), (1500, 3));

        let down = rescale(DecimalWords::from_decimal(dec("1.500")), 1).unwrap();
        assert_eq!((down.magnitude(), down.scale), (15, 1));

        assert_eq!(
            rescale(DecimalWords::from_decimal(dec("1.55")), 1),
            Err(NumericError::PrecisionLoss)
        );
        assert_eq!(
            rescale(DecimalWords::from_decimal(Decimal::MAX), 1),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            rescale(DecimalWords::from_decimal(dec("1")), 29),
            Err(NumericError::OutOfRange)
        );
    }

    #[test]
    fn test_rescale_across_chunks() {
        let value = DecimalWords::from_decimal(dec("7"));
        let up = rescale(value, 20).unwrap();
        assert_eq!(up.magnitude(), 7 * 10u128.pow(20));
        let back = rescale(up, 0).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_trim() {
        let words = trim(DecimalWords::from_decimal(dec("1.2300")));
        assert_eq!((words.magnitude(), words.scale), (123, 2));

        let integer = trim(DecimalWords::from_decimal(dec("100")));
        assert_eq!((integer.magnitude(), integer.scale), (100, 0));

        let zero = trim(DecimalWords::from_decimal(dec("0.000")));
        assert_eq!((zero.magnitude(), zero.scale), (0, 0));
    }

    fn any_decimal() -> impl Strategy<Value = Decimal> {
        (any::<i64>(), 0u32..=28).prop_map(|(m, s)| Decimal::new(m, s))
    }

    proptest! {
        #[test]
        fn prop_truncate_equals_toward_zero(value in any_decimal(), target in -5i32..=28) {
            let words = DecimalWords::from_decimal(value);
            let a = round(words, target, RoundingMode::Truncate);
            let b = round(words, target, RoundingMode::TowardZero);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_symmetric_modes_commute_with_negation(value in any_decimal(), target in 0i32..=28) {
            use RoundingMode::*;
            for mode in [ToEven, ToOdd, HalfAwayFromZero, HalfTowardZero, AwayFromZero, Truncate] {
                let positive = round(DecimalWords::from_decimal(value), target, mode).unwrap().to_decimal();
                let negative = round(DecimalWords::from_decimal(-value), target, mode).unwrap().to_decimal();
                prop_assert_eq!(positive, -negative);
            }
        }

        #[test]
        fn prop_floor_and_ceiling_bracket(value in any_decimal(), target in 0i32..=28) {
            let floor = round(DecimalWords::from_decimal(value), target, RoundingMode::Floor).unwrap().to_decimal();
            let ceiling = round(DecimalWords::from_decimal(value), target, RoundingMode::Ceiling).unwrap().to_decimal();
            prop_assert!(floor <= value);
            prop_assert!(value <= ceiling);
        }

        #[test]
        fn prop_trim_preserves_value(value in any_decimal()) {
            let trimmed = trim(DecimalWords::from_decimal(value));
            prop_assert_eq!(trimmed.to_decimal(), value);
        }
    }
}
