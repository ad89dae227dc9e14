// ============================================================================
// Decimal Rounding Extension
// Rounding engine entry points on rust_decimal::Decimal
// ============================================================================

use super::rounding::{rescale, round, trim, RoundingMode};
use super::words::DecimalWords;
use crate::numeric::NumericResult;
use rust_decimal::Decimal;

/// Rounding engine operations on the boundary decimal type.
///
/// # Example
/// ```
/// use exact_fraction::decimal::{DecimalRoundingExt, RoundingMode};
/// use rust_decimal::Decimal;
///
/// let value = Decimal::new(1005, 3); // 1.005
/// assert_eq!(value.round_with_mode(2, RoundingMode::ToEven)?, Decimal::new(100, 2));
/// # Ok::<(), exact_fraction::numeric::NumericError>(())
/// ```
pub trait DecimalRoundingExt: Sized {
    /// Round to `decimals` digits after the point (negative rounds to tens,
    /// hundreds, ...).
    fn round_with_mode(self, decimals: i32, mode: RoundingMode) -> NumericResult<Self>;

    /// Change the scale without rounding.
    fn rescale_exact(self, scale: u8) -> NumericResult<Self>;

    /// Drop trailing zeros after the point.
    fn trim_zeros(self) -> Self;
}

impl DecimalRoundingExt for Decimal {
    #[inline]
    fn round_with_mode(self, decimals: i32, mode: RoundingMode) -> NumericResult<Self> {
        round(DecimalWords::from_decimal(self), decimals, mode).map(DecimalWords::to_decimal)
    }

    #[inline]
    fn rescale_exact(self, scale: u8) -> NumericResult<Self> {
        rescale(DecimalWords::from_decimal(self), scale).map(DecimalWords::to_decimal)
    }

    #[inline]
    fn trim_zeros(self) -> Self {
        trim(DecimalWords::from_decimal(self)).to_decimal()
    }
}
