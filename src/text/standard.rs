// ============================================================================
// Standard Numeric Formats
// G, D, F, N and P specifiers for integers and decimals
// ============================================================================

use super::NumberFormat;
use crate::decimal::{DecimalRoundingExt, RoundingMode, MAX_SCALE};
use crate::numeric::{NumericError, NumericResult};
use rust_decimal::Decimal;

/// Widest precision accepted after a specifier letter.
const MAX_PRECISION_DIGITS: usize = 2;

/// A parsed standard format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Specifier {
    /// Shortest exact form (`G` or empty)
    General,
    /// Integer digits zero-padded to a minimum width (`D[n]`)
    Digits(usize),
    /// Fixed number of decimals (`F[n]`, default 2)
    Fixed(u32),
    /// Fixed decimals with digit grouping (`N[n]`, default 2)
    Number(u32),
    /// Value times 100 with grouping and the percent symbol (`P[n]`, default 2)
    Percent(u32),
}

impl Specifier {
    pub(crate) fn parse(pattern: &str) -> NumericResult<Self> {
        let pattern = pattern.trim();
        let mut chars = pattern.chars();
        let Some(letter) = chars.next() else {
            return Ok(Self::General);
        };

        let digits = chars.as_str();
        if digits.len() > MAX_PRECISION_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidFormat);
        }
        let precision: Option<u32> = if digits.is_empty() {
            None
        } else {
            Some(digits.parse().map_err(|_| NumericError::InvalidFormat)?)
        };

        let decimals = |default: u32| -> NumericResult<u32> {
            let decimals = precision.unwrap_or(default);
            if decimals > MAX_SCALE as u32 {
                return Err(NumericError::InvalidFormat);
            }
            Ok(decimals)
        };

        match letter.to_ascii_uppercase() {
            'G' if precision.is_none() => Ok(Self::General),
            'D' => Ok(Self::Digits(precision.unwrap_or(0) as usize)),
            'F' => Ok(Self::Fixed(decimals(2)?)),
            'N' => Ok(Self::Number(decimals(2)?)),
            'P' => Ok(Self::Percent(decimals(2)?)),
            _ => Err(NumericError::InvalidFormat),
        }
    }
}

/// Format an integer with a standard specifier.
pub fn format_integer(value: i64, pattern: &str, format: &NumberFormat) -> NumericResult<String> {
    format_decimal(Decimal::from(value), pattern, format)
}

/// Format a decimal with a standard specifier.
///
/// Rounding for `F`, `N` and `P` is half away from zero. `D` only accepts
/// integral values.
///
/// # Errors
/// - `InvalidFormat` for unknown specifiers, or `D` with a fractional value
/// - `Overflow` if scaling for `P` or widening to the requested decimals
///   needs more than 96 bits
pub fn format_decimal(value: Decimal, pattern: &str, format: &NumberFormat) -> NumericResult<String> {
    match Specifier::parse(pattern)? {
        Specifier::General => Ok(localize(&value.normalize().to_string(), format)),
        Specifier::Digits(width) => {
            if !value.fract().is_zero() {
                return Err(NumericError::InvalidFormat);
            }
            let digits = value.trunc().abs().normalize().to_string();
            let mut out = String::with_capacity(width.max(digits.len()) + 1);
            if value.is_sign_negative() && !value.is_zero() {
                out.push_str(&format.negative_sign);
            }
            out.extend(std::iter::repeat('0').take(width.saturating_sub(digits.len())));
            out.push_str(&digits);
            Ok(out)
        },
        Specifier::Fixed(decimals) => fixed(value, decimals, false, format),
        Specifier::Number(decimals) => fixed(value, decimals, true, format),
        Specifier::Percent(decimals) => {
            let scaled = value
                .checked_mul(Decimal::ONE_HUNDRED)
                .ok_or(NumericError::Overflow)?;
            let mut out = fixed(scaled, decimals, true, format)?;
            out.push(' ');
            out.push_str(&format.percent_symbol);
            Ok(out)
        },
    }
}

fn fixed(value: Decimal, decimals: u32, grouped: bool, format: &NumberFormat) -> NumericResult<String> {
    let rounded = value
        .round_with_mode(decimals as i32, RoundingMode::HalfAwayFromZero)?
        .rescale_exact(decimals as u8)?;

    let text = rounded.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::with_capacity(text.len() + 8);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push_str(&format.negative_sign);
    }
    if grouped {
        push_grouped(&mut out, integer, format);
    } else {
        out.push_str(integer);
    }
    if decimals > 0 {
        out.push_str(&format.decimal_separator);
        out.push_str(fraction);
    }
    Ok(out)
}

/// Append `digits` with the group separator inserted every `group_size`
/// digits from the right.
fn push_grouped(out: &mut String, digits: &str, format: &NumberFormat) {
    let size = format.group_size;
    if size == 0 || digits.len() <= size {
        out.push_str(digits);
        return;
    }

    let lead = digits.len() % size;
    let lead = if lead == 0 { size } else { lead };
    out.push_str(&digits[..lead]);
    for group in digits.as_bytes()[lead..].chunks(size) {
        out.push_str(&format.group_separator);
        // chunks of an ASCII digit string stay valid UTF-8
        out.extend(group.iter().map(|&b| b as char));
    }
}

/// Swap the invariant sign and point for the locale's.
fn localize(text: &str, format: &NumberFormat) -> String {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut out = String::with_capacity(text.len() + format.negative_sign.len());
    if negative {
        out.push_str(&format.negative_sign);
    }
    match digits.split_once('.') {
        Some((integer, fraction)) => {
            out.push_str(integer);
            out.push_str(&format.decimal_separator);
            out.push_str(fraction);
        },
        None => out.push_str(digits),
    }
    out
}
