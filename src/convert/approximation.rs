// ============================================================================
// Decimal Approximation
// Smallest-denominator rational within an error bound of a decimal
// ============================================================================

use crate::numeric::{NumericError, NumericResult, RationalNumber};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Exact non-negative fraction `numerator / denominator` over u128.
///
/// Decimal boundaries convert losslessly (`mantissa / 10^scale`), and taking
/// a reciprocal only swaps the fields, so the search never rounds.
#[derive(Debug, Clone, Copy)]
struct Boundary {
    numerator: u128,
    denominator: u128,
}

impl Boundary {
    fn from_decimal(value: Decimal) -> Self {
        Self {
            numerator: value.mantissa().unsigned_abs(),
            denominator: 10u128.pow(value.scale()),
        }
    }

    /// True when `value <= self`.
    fn admits(self, value: u128) -> bool {
        value
            .checked_mul(self.denominator)
            .is_some_and(|scaled| scaled <= self.numerator)
    }
}

/// Best rational approximation of `value` within `error`.
///
/// Returns the fraction with the smallest denominator whose distance from
/// `value` is at most `error`.
///
/// # Errors
/// - `OutOfRange` if `error` is not in (0, 1] or `|value|` exceeds i64::MAX
/// - `Overflow` if the result does not fit i64
///
/// # Example
/// ```
/// use exact_fraction::convert::approximate;
/// use exact_fraction::numeric::RationalNumber;
/// use rust_decimal::Decimal;
///
/// let pi = Decimal::new(3_1415926, 7);
/// let x = approximate(pi, Decimal::new(1, 3))?;
/// assert_eq!(x, RationalNumber::new(201, 64)?);
/// # Ok::<(), exact_fraction::numeric::NumericError>(())
/// ```
pub fn approximate(value: Decimal, error: Decimal) -> NumericResult<RationalNumber> {
    if error <= Decimal::ZERO || error > Decimal::ONE {
        return Err(NumericError::OutOfRange);
    }

    let magnitude = value.abs();
    if magnitude > Decimal::from(i64::MAX) {
        return Err(NumericError::OutOfRange);
    }

    let negative = value.is_sign_negative();
    let integer_part = magnitude.trunc();
    let fractional = magnitude - integer_part;
    let whole = integer_part.to_i64().ok_or(NumericError::OutOfRange)?;

    let signed = |numerator: i64, denominator: i64| {
        RationalNumber::new(if negative { -numerator } else { numerator }, denominator)
    };

    if fractional <= error {
        return signed(whole, 1);
    }
    if fractional + error >= Decimal::ONE {
        return signed(whole.checked_add(1).ok_or(NumericError::Overflow)?, 1);
    }

    let (numerator, denominator) = narrow(
        Boundary::from_decimal(fractional - error),
        Boundary::from_decimal(fractional + error),
    )?;

    let numerator = whole
        .checked_mul(denominator)
        .and_then(|scaled| scaled.checked_add(numerator))
        .ok_or(NumericError::Overflow)?;

    signed(numerator, denominator)
}

/// Simplest fraction in `[low, high]`, for `0 < low < high < 1`.
///
/// Walks the continued-fraction expansion of both boundaries while they
/// share a term, folding each term into the running convergent pairs. The
/// first level at which the interval contains an integer ends the walk with
/// the smallest such integer as the final term.
fn narrow(mut low: Boundary, mut high: Boundary) -> NumericResult<(i64, i64)> {
    // (convergent n-2, convergent n-1)
    let (mut lo_numerator, mut hi_numerator) = (0u128, 1u128);
    let (mut lo_denominator, mut hi_denominator) = (1u128, 0u128);

    loop {
        let term = low.numerator / low.denominator;
        let low_is_integer = low.numerator % low.denominator == 0;
        let ceiling = if low_is_integer { term } else { term + 1 };

        if high.admits(ceiling) {
            let numerator = fold(ceiling, hi_numerator, lo_numerator)?;
            let denominator = fold(ceiling, hi_denominator, lo_denominator)?;
            tracing::trace!(%ceiling, %numerator, %denominator, "approximation settled");
            return Ok((to_i64(numerator)?, to_i64(denominator)?));
        }

        tracing::trace!(%term, "continued fraction term");

        (lo_numerator, hi_numerator) = (hi_numerator, fold(term, hi_numerator, lo_numerator)?);
        (lo_denominator, hi_denominator) =
            (hi_denominator, fold(term, hi_denominator, lo_denominator)?);

        // [low, high] - term, inverted: the bounds swap roles
        let next_low = Boundary {
            numerator: high.denominator,
            denominator: high.numerator - term * high.denominator,
        };
        let next_high = Boundary {
            numerator: low.denominator,
            denominator: low.numerator - term * low.denominator,
        };
        low = next_low;
        high = next_high;
    }
}

#[inline]
fn fold(term: u128, previous: u128, before: u128) -> NumericResult<u128> {
    term.checked_mul(previous)
        .and_then(|scaled| scaled.checked_add(before))
        .ok_or(NumericError::Overflow)
}

#[inline]
fn to_i64(value: u128) -> NumericResult<i64> {
    i64::try_from(value).map_err(|_| NumericError::Overflow)
}

impl RationalNumber {
    /// Best rational approximation of a decimal; see [`approximate`].
    #[inline]
    pub fn approximate(value: Decimal, error: Decimal) -> NumericResult<Self> {
        approximate(value, error)
    }
}
