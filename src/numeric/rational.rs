// ============================================================================
// Rational Number
// Reduced i64 fraction with overflow-checked arithmetic
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::gcd::{gcd, gcd_i64};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Exact rational number `numerator / denominator` over i64.
///
/// Always kept in canonical form: the sign lives on the numerator, the
/// denominator is positive and `gcd(|numerator|, denominator) == 1`. Neither
/// field is ever `i64::MIN`, so negation and `abs` can never overflow.
///
/// The canonical zero is the all-zero bit pattern (`Default`), which means
/// its stored denominator is 0. Use [`RationalNumber::denominator`] rather
/// than assuming the field is positive.
///
/// # Example
/// ```
/// use exact_fraction::numeric::RationalNumber;
///
/// let x = RationalNumber::new(6, 4)?;
/// assert_eq!((x.numerator(), x.denominator()), (3, 2));
///
/// let y = x.checked_add(RationalNumber::new(1, 2)?)?;
/// assert_eq!(y, RationalNumber::from_integer(2)?);
/// # Ok::<(), exact_fraction::numeric::NumericError>(())
/// ```
#[derive(Clone, Copy, Default)]
pub struct RationalNumber {
    numerator: i64,
    denominator: i64,
}

impl RationalNumber {
    /// Zero (the default value)
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 0,
    };

    /// One (1/1)
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Smallest positive value (1 / i64::MAX)
    pub const EPSILON: Self = Self {
        numerator: 1,
        denominator: i64::MAX,
    };

    /// Maximum representable value (i64::MAX / 1)
    pub const MAX: Self = Self {
        numerator: i64::MAX,
        denominator: 1,
    };

    /// Minimum representable value (-i64::MAX / 1)
    pub const MIN: Self = Self {
        numerator: -i64::MAX,
        denominator: 1,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a reduced fraction.
    ///
    /// An odd number of negative arguments puts the sign on the numerator.
    ///
    /// # Errors
    /// Returns `OutOfRange` if either argument is `i64::MIN` or the
    /// denominator is zero.
    pub fn new(numerator: i64, denominator: i64) -> NumericResult<Self> {
        if numerator == i64::MIN || denominator == i64::MIN || denominator == 0 {
            return Err(NumericError::OutOfRange);
        }
        Ok(Self::reduce(numerator, denominator))
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `OutOfRange` for `i64::MIN`.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        Self::new(value, 1)
    }

    /// Normalize and reduce. Both arguments must be valid `new` inputs.
    fn reduce(numerator: i64, denominator: i64) -> Self {
        if numerator == 0 {
            return Self::ZERO;
        }

        let negative = (numerator < 0) != (denominator < 0);
        let n = numerator.abs();
        let d = denominator.abs();
        let g = gcd_i64(n, d);
        let n = n / g;

        Self {
            numerator: if negative { -n } else { n },
            denominator: d / g,
        }
    }

    /// Reduce an intermediate arithmetic result. `i64::MIN` is accepted as
    /// long as it reduces away; a part still above i64::MAX is an overflow.
    fn from_arithmetic(numerator: i64, denominator: i64) -> NumericResult<Self> {
        if denominator == 0 {
            return Err(NumericError::DivisionByZero);
        }
        if numerator == 0 {
            return Ok(Self::ZERO);
        }

        let negative = (numerator < 0) != (denominator < 0);
        let n = numerator.unsigned_abs();
        let d = denominator.unsigned_abs();
        let g = gcd(n, d);
        let n = i64::try_from(n / g).map_err(|_| NumericError::Overflow)?;
        let d = i64::try_from(d / g).map_err(|_| NumericError::Overflow)?;

        Ok(Self {
            numerator: if negative { -n } else { n },
            denominator: d,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The signed numerator.
    #[inline]
    pub const fn numerator(self) -> i64 {
        self.numerator
    }

    /// The positive denominator (1 for zero).
    #[inline]
    pub const fn denominator(self) -> i64 {
        if self.denominator == 0 {
            1
        } else {
            self.denominator
        }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.numerator == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.numerator < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.numerator > 0
    }

    /// True when the value has no fractional part.
    #[inline]
    pub const fn is_integer(self) -> bool {
        self.denominator() == 1
    }

    /// -1, 0 or 1 according to the sign.
    #[inline]
    pub const fn signum(self) -> i64 {
        self.numerator.signum()
    }

    /// Absolute value. Cannot overflow since the numerator is never i64::MIN.
    #[inline]
    pub const fn abs(self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator,
        }
    }

    /// Integer part, truncated toward zero.
    #[inline]
    pub fn whole_part(self) -> Self {
        Self::reduce(self.numerator / self.denominator(), 1)
    }

    /// `self - self.whole_part()`, carrying the sign of `self`.
    #[inline]
    pub fn fractional_part(self) -> Self {
        let remainder = self.numerator % self.denominator();
        if remainder == 0 {
            Self::ZERO
        } else {
            // gcd(n mod d, d) == gcd(n, d) == 1, so this is already reduced
            Self {
                numerator: remainder,
                denominator: self.denominator,
            }
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// Denominators are cross-reduced by their GCD first. When one divides
    /// the other only the numerator on the smaller side is scaled.
    ///
    /// # Errors
    /// Returns `Overflow` if any intermediate product leaves i64.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        if self.is_zero() {
            return Ok(rhs);
        }
        if rhs.is_zero() {
            return Ok(self);
        }

        let (n0, d0) = (self.numerator, self.denominator);
        let (n1, d1) = (rhs.numerator, rhs.denominator);

        if d0 == d1 {
            let numerator = n0.checked_add(n1).ok_or(NumericError::Overflow)?;
            return Self::from_arithmetic(numerator, d0);
        }

        let g = gcd_i64(d0, d1);
        let (r0, r1) = (d0 / g, d1 / g);

        let (numerator, denominator) = if r1 == 1 {
            // d1 divides d0
            (checked_mul(n1, r0)?.checked_add(n0), d0)
        } else if r0 == 1 {
            // d0 divides d1
            (checked_mul(n0, r1)?.checked_add(n1), d1)
        } else {
            let left = checked_mul(n0, r1)?;
            let right = checked_mul(n1, r0)?;
            (left.checked_add(right), checked_mul(r0, d1)?)
        };

        Self::from_arithmetic(numerator.ok_or(NumericError::Overflow)?, denominator)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` if any intermediate product leaves i64.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.checked_add(-rhs)
    }

    /// Checked multiplication.
    ///
    /// Each numerator is reduced against the opposite denominator before
    /// multiplying, so the product is already in canonical form.
    ///
    /// # Errors
    /// Returns `Overflow` if either product leaves i64.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::ZERO);
        }

        let g1 = gcd_i64(self.numerator, rhs.denominator);
        let g2 = gcd_i64(rhs.numerator, self.denominator);

        let numerator = checked_mul(self.numerator / g1, rhs.numerator / g2)?;
        let denominator = checked_mul(self.denominator / g2, rhs.denominator / g1)?;

        if numerator == i64::MIN {
            return Err(NumericError::Overflow);
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Checked division (multiplication by the inverse).
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero, `Overflow` on overflow.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        self.checked_mul(rhs.inverse()?)
    }

    /// Checked remainder. The result carries the sign of `self`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero, `Overflow` on overflow.
    pub fn checked_rem(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }

        let (d0, d1) = (self.denominator, rhs.denominator);
        let g = gcd_i64(d0, d1);
        let (r0, r1) = (d0 / g, d1 / g);

        let dividend = checked_mul(self.numerator, r1)?;
        let divisor = checked_mul(rhs.numerator, r0)?;
        let numerator = dividend
            .checked_rem(divisor)
            .ok_or(NumericError::Overflow)?;

        Self::from_arithmetic(numerator, checked_mul(r0, d1)?)
    }

    /// Multiplicative inverse, keeping the sign on the numerator.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for zero.
    #[inline]
    pub fn inverse(self) -> NumericResult<Self> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.numerator < 0 {
            Ok(Self {
                numerator: -self.denominator,
                denominator: -self.numerator,
            })
        } else {
            Ok(Self {
                numerator: self.denominator,
                denominator: self.numerator,
            })
        }
    }

    /// Integer power by repeated squaring. Negative exponents invert first.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero base with a negative exponent and
    /// `Overflow` if an intermediate power leaves i64.
    pub fn checked_pow(self, exponent: i32) -> NumericResult<Self> {
        if exponent == 0 {
            return Ok(Self::ONE);
        }

        let mut base = if exponent < 0 { self.inverse()? } else { self };
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::ONE;

        loop {
            if remaining & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            base = base.checked_mul(base)?;
        }

        Ok(result)
    }
}

#[inline]
fn checked_mul(a: i64, b: i64) -> NumericResult<i64> {
    a.checked_mul(b).ok_or(NumericError::Overflow)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for RationalNumber {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.numerator == other.numerator && self.denominator() == other.denominator()
    }
}

impl Eq for RationalNumber {}

impl PartialOrd for RationalNumber {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalNumber {
    /// Exact when the denominators match or either side is zero.
    ///
    /// Otherwise the cross products are compared as f64. This is a known
    /// limitation: with numerators and denominators near i64::MAX the 53-bit
    /// mantissa can report `Equal` or the wrong order for distinct values.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator() == other.denominator() || self.is_zero() || other.is_zero() {
            return self.numerator.cmp(&other.numerator);
        }

        let left = self.numerator as f64 * other.denominator as f64;
        let right = other.numerator as f64 * self.denominator as f64;
        left.partial_cmp(&right).unwrap_or(Ordering::Equal)
    }
}

impl Hash for RationalNumber {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numerator.hash(state);
        self.denominator().hash(state);
    }
}

impl Neg for RationalNumber {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

// Infallible operators for ergonomics (panic on overflow - use checked_* in production)
impl Add for RationalNumber {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("RationalNumber addition overflow")
    }
}

impl Sub for RationalNumber {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .expect("RationalNumber subtraction overflow")
    }
}

impl Mul for RationalNumber {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
            .expect("RationalNumber multiplication overflow")
    }
}

impl Div for RationalNumber {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).expect("RationalNumber division failed")
    }
}

impl Rem for RationalNumber {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(rhs).expect("RationalNumber remainder failed")
    }
}

impl From<i32> for RationalNumber {
    #[inline]
    fn from(value: i32) -> Self {
        Self::reduce(value as i64, 1)
    }
}

impl From<u32> for RationalNumber {
    #[inline]
    fn from(value: u32) -> Self {
        Self::reduce(value as i64, 1)
    }
}

impl TryFrom<i64> for RationalNumber {
    type Error = NumericError;

    #[inline]
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_integer(value)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for RationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RationalNumber({}/{})",
            self.numerator,
            self.denominator()
        )
    }
}

impl fmt::Display for RationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
