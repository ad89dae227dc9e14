// ============================================================================
// Rational <-> Decimal Casts
// Exact decimal intake, division-based output, and rounded decimal output
// ============================================================================

use crate::decimal::{should_round_up, DecimalWords, Discarded, RoundingMode, MAX_SCALE};
use crate::numeric::{NumericError, NumericResult, RationalNumber};
use rand::Rng;
use rust_decimal::Decimal;

impl TryFrom<Decimal> for RationalNumber {
    type Error = NumericError;

    /// Exact conversion: `mantissa / 10^scale`, reduced.
    ///
    /// The denominator only has factors 2 and 5, so reduction strips those
    /// instead of running a full GCD over 96-bit values.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the reduced fraction does not fit i64.
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let mut numerator = value.mantissa().unsigned_abs();
        let mut denominator = 10u128.pow(value.scale());

        if numerator == 0 {
            return Ok(Self::ZERO);
        }

        for factor in [2u128, 5] {
            while denominator % factor == 0 && numerator % factor == 0 {
                numerator /= factor;
                denominator /= factor;
            }
        }

        let numerator = i64::try_from(numerator).map_err(|_| NumericError::OutOfRange)?;
        let denominator = i64::try_from(denominator).map_err(|_| NumericError::OutOfRange)?;

        Self::new(
            if value.is_sign_negative() { -numerator } else { numerator },
            denominator,
        )
    }
}

impl RationalNumber {
    /// Decimal quotient, rounded by `rust_decimal` to 28 significant digits.
    #[inline]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.numerator()) / Decimal::from(self.denominator())
    }

    /// Nearest f64 quotient.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator() as f64 / self.denominator() as f64
    }

    /// Decimal with exactly `decimals` digits after the point.
    ///
    /// Long-divides the fraction digit by digit into a 96-bit magnitude and
    /// rounds on the exact remainder, so ties are detected without any
    /// intermediate rounding.
    ///
    /// # Errors
    /// - `OutOfRange` if `decimals` exceeds 28
    /// - `Overflow` if the result needs more than 96 bits
    pub fn to_decimal_rounded(self, decimals: u32, mode: RoundingMode) -> NumericResult<Decimal> {
        self.to_decimal_rounded_with_rng(decimals, mode, &mut rand::thread_rng())
    }

    /// [`to_decimal_rounded`](Self::to_decimal_rounded) with an explicit
    /// random source for the randomized modes.
    pub fn to_decimal_rounded_with_rng<R: Rng + ?Sized>(
        self,
        decimals: u32,
        mode: RoundingMode,
        rng: &mut R,
    ) -> NumericResult<Decimal> {
        if decimals > MAX_SCALE as u32 {
            return Err(NumericError::OutOfRange);
        }

        let negative = self.is_negative();
        let numerator = self.numerator().unsigned_abs();
        let denominator = self.denominator().unsigned_abs();

        let mut words = DecimalWords::from_magnitude((numerator / denominator) as u128, 0, negative)?;
        let mut remainder = numerator % denominator;

        for _ in 0..decimals {
            let scaled = remainder as u128 * 10;
            let digit = (scaled / denominator as u128) as u32;
            remainder = (scaled % denominator as u128) as u64;
            words.mul_small(10)?;
            words.add_small(digit)?;
        }
        words.scale = decimals as u8;

        let discarded = Discarded::EXACT.push(remainder, denominator);
        if should_round_up(mode, negative, words.is_odd(), discarded, rng) {
            words.add_small(1)?;
        }

        Ok(words.to_decimal())
    }
}

impl From<RationalNumber> for f64 {
    #[inline]
    fn from(value: RationalNumber) -> Self {
        value.to_f64()
    }
}

impl From<RationalNumber> for Decimal {
    #[inline]
    fn from(value: RationalNumber) -> Self {
        value.to_decimal()
    }
}
