// ============================================================================
// Decimal Words
// 96-bit magnitude + scale + sign view of a base-10 floating decimal
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use rust_decimal::Decimal;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_SCALE: u8 = 28;

/// Largest power of ten that fits a u32 divisor.
pub(crate) const MAX_POWER_STEP: u32 = 9;

/// Powers of ten that fit in a u32 (10^0 ..= 10^9).
pub(crate) const POWERS_OF_10: [u32; 10] = [
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
];

/// Mutable word-level view of a decimal.
///
/// Represents `(-1)^negative * (hi * 2^64 + mid * 2^32 + lo) * 10^-scale`.
/// Built from a `Decimal`, worked on in place during one rounding or rescale
/// call, then turned back into a `Decimal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalWords {
    pub lo: u32,
    pub mid: u32,
    pub hi: u32,
    pub scale: u8,
    pub negative: bool,
}

impl DecimalWords {
    /// Split a `Decimal` into its words.
    pub fn from_decimal(value: Decimal) -> Self {
        let magnitude = value.mantissa().unsigned_abs();
        Self {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: (magnitude >> 64) as u32,
            scale: value.scale() as u8,
            negative: value.is_sign_negative(),
        }
    }

    /// Build from a magnitude. Fails with `Overflow` above 96 bits and
    /// `OutOfRange` above scale 28.
    pub fn from_magnitude(magnitude: u128, scale: u8, negative: bool) -> NumericResult<Self> {
        if magnitude >> 96 != 0 {
            return Err(NumericError::Overflow);
        }
        if scale > MAX_SCALE {
            return Err(NumericError::OutOfRange);
        }
        Ok(Self {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: (magnitude >> 64) as u32,
            scale,
            negative,
        })
    }

    /// Reassemble into a `Decimal`. Negative zero is normalized to zero.
    pub fn to_decimal(self) -> Decimal {
        let negative = self.negative && !self.is_zero();
        Decimal::from_parts(self.lo, self.mid, self.hi, negative, self.scale as u32)
    }

    /// The full 96-bit magnitude.
    #[inline]
    pub fn magnitude(&self) -> u128 {
        ((self.hi as u128) << 64) | ((self.mid as u128) << 32) | self.lo as u128
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        (self.lo | self.mid | self.hi) == 0
    }

    /// True when the lowest magnitude bit is set.
    #[inline]
    pub fn is_odd(&self) -> bool {
        (self.lo & 1) == 1
    }

    // ========================================================================
    // Word-wise primitives
    // ========================================================================

    /// Divide the magnitude in place, returning the remainder.
    ///
    /// Long division from the top word down, carrying each remainder into
    /// the next word. `divisor` must be non-zero.
    pub(crate) fn div_small(&mut self, divisor: u32) -> u32 {
        let divisor = divisor as u64;

        let hi = self.hi as u64;
        self.hi = (hi / divisor) as u32;
        let carry = hi % divisor;

        let mid = (carry << 32) | self.mid as u64;
        self.mid = (mid / divisor) as u32;
        let carry = mid % divisor;

        let lo = (carry << 32) | self.lo as u64;
        self.lo = (lo / divisor) as u32;
        (lo % divisor) as u32
    }

    /// Multiply the magnitude in place.
    ///
    /// # Errors
    /// Returns `Overflow` if the product needs more than 96 bits. The value
    /// is left unchanged in that case.
    pub(crate) fn mul_small(&mut self, factor: u32) -> NumericResult<()> {
        let factor = factor as u64;

        let lo = self.lo as u64 * factor;
        let mid = self.mid as u64 * factor + (lo >> 32);
        let hi = self.hi as u64 * factor + (mid >> 32);

        if hi >> 32 != 0 {
            return Err(NumericError::Overflow);
        }

        self.lo = lo as u32;
        self.mid = mid as u32;
        self.hi = hi as u32;
        Ok(())
    }

    /// Add to the magnitude in place, propagating the carry upward.
    ///
    /// # Errors
    /// Returns `Overflow` if the carry leaves the top word. The value is left
    /// unchanged in that case.
    pub(crate) fn add_small(&mut self, addend: u32) -> NumericResult<()> {
        let lo = self.lo as u64 + addend as u64;
        let mid = self.mid as u64 + (lo >> 32);
        let hi = self.hi as u64 + (mid >> 32);

        if hi >> 32 != 0 {
            return Err(NumericError::Overflow);
        }

        self.lo = lo as u32;
        self.mid = mid as u32;
        self.hi = hi as u32;
        Ok(())
    }

    /// Divide the magnitude by `10^power` (`power <= 9`).
    ///
    /// Returns `(remainder, divisor)`. The scale is not touched.
    #[inline]
    pub(crate) fn div_pow10(&mut self, power: u32) -> (u32, u32) {
        let divisor = POWERS_OF_10[power as usize];
        (self.div_small(divisor), divisor)
    }

    /// Multiply the magnitude by `10^power` (`power <= 9`).
    #[inline]
    pub(crate) fn mul_pow10(&mut self, power: u32) -> NumericResult<()> {
        self.mul_small(POWERS_OF_10[power as usize])
    }
}

impl From<Decimal> for DecimalWords {
    #[inline]
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<DecimalWords> for Decimal {
    #[inline]
    fn from(words: DecimalWords) -> Self {
        words.to_decimal()
    }
}
