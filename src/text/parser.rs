// ============================================================================
// Fraction Parser
// Integers, decimals, percentages and fraction notation into rationals
// ============================================================================

use super::glyphs;
use super::NumberFormat;
use crate::convert::approximate;
use crate::numeric::{NumericError, NumericResult, RationalNumber};
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::str::FromStr;

/// Digits collected for the run being scanned. i64 needs at most 19, so the
/// common case never allocates.
type DigitRun = SmallVec<[char; 20]>;

/// What the fraction scanner has consumed so far.
#[derive(Debug, Default, Clone, Copy)]
struct ScanState {
    bar: bool,
    whole_separator: bool,
    superscript: bool,
    subscript: bool,
    /// Plain digits in the current run
    plain: bool,
}

/// Parse `text` as a rational, or `None` if no reading applies.
///
/// Readings are tried in order: integer, decimal, percentage (`%` or `‰`),
/// then fraction notation. Empty or all-space input reads as zero.
///
/// Fraction notation is `[sign][whole<sep>]numerator<bar>denominator`:
/// - `bar` is any of [`glyphs::FRACTION_BARS`]
/// - `sep` is a space, or `+` when the locale groups digits with spaces
/// - the numerator may be superscript digits, directly after a plain whole
///   part (`1¹⁄₂`)
/// - the denominator may be subscript digits
/// - a vulgar fraction glyph may stand alone or follow plain digits (`1½`)
///
/// Decimals that do not fit an exact fraction are approximated to within
/// one unit of their last digit.
#[tracing::instrument(level = "trace", skip(format), ret)]
pub fn try_parse(text: &str, format: &NumberFormat) -> Option<RationalNumber> {
    let text = text.trim();
    if text.is_empty() {
        return Some(RationalNumber::ZERO);
    }

    parse_integer(text, format)
        .or_else(|| parse_decimal(text, format))
        .or_else(|| parse_percentage(text, format))
        .or_else(|| parse_fraction(text, format))
}

/// Like [`try_parse`], failing with `InvalidFormat`.
pub fn parse(text: &str, format: &NumberFormat) -> NumericResult<RationalNumber> {
    try_parse(text, format).ok_or(NumericError::InvalidFormat)
}

impl RationalNumber {
    /// See [`try_parse`].
    #[inline]
    pub fn try_parse(text: &str, format: &NumberFormat) -> Option<Self> {
        try_parse(text, format)
    }

    /// See [`parse`].
    #[inline]
    pub fn parse(text: &str, format: &NumberFormat) -> NumericResult<Self> {
        parse(text, format)
    }
}

impl FromStr for RationalNumber {
    type Err = NumericError;

    /// Parse with invariant conventions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, &NumberFormat::invariant())
    }
}

// ============================================================================
// Numeric Readings
// ============================================================================

fn split_sign<'a>(text: &'a str, format: &NumberFormat) -> (bool, &'a str) {
    if !format.negative_sign.is_empty() {
        if let Some(rest) = text.strip_prefix(format.negative_sign.as_str()) {
            return (true, rest);
        }
    }
    if !format.positive_sign.is_empty() {
        if let Some(rest) = text.strip_prefix(format.positive_sign.as_str()) {
            return (false, rest);
        }
    }
    (false, text)
}

fn parse_integer(text: &str, format: &NumberFormat) -> Option<RationalNumber> {
    let (negative, digits) = split_sign(text, format);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    RationalNumber::from_integer(if negative { -magnitude } else { magnitude }).ok()
}

fn parse_decimal(text: &str, format: &NumberFormat) -> Option<RationalNumber> {
    let (negative, mut rest) = split_sign(text, format);
    let point = format.decimal_separator.as_str();
    let group = format.group_separator.as_str();

    let mut normalized = String::with_capacity(rest.len() + 2);
    let mut seen_point = false;
    let mut digits = 0usize;

    while let Some(c) = rest.chars().next() {
        if !point.is_empty() && rest.starts_with(point) {
            if seen_point {
                return None;
            }
            seen_point = true;
            normalized.push('.');
            rest = &rest[point.len()..];
        } else if !seen_point && digits > 0 && !group.is_empty() && rest.starts_with(group) {
            rest = &rest[group.len()..];
        } else if c.is_ascii_digit() {
            normalized.push(c);
            digits += 1;
            rest = &rest[1..];
        } else {
            return None;
        }
    }

    if digits == 0 {
        return None;
    }
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if normalized.ends_with('.') {
        normalized.pop();
    }

    let value = Decimal::from_str(&normalized).ok()?;
    from_decimal(if negative { -value } else { value })
}

/// Exact when the decimal reduces into i64, otherwise the simplest fraction
/// within one unit of the last digit.
fn from_decimal(value: Decimal) -> Option<RationalNumber> {
    if value.abs() > Decimal::from(i64::MAX) {
        return None;
    }

    RationalNumber::try_from(value).ok().or_else(|| {
        tracing::trace!(%value, "decimal has no exact i64 fraction, approximating");
        approximate(value, Decimal::new(1, value.scale())).ok()
    })
}

fn parse_percentage(text: &str, format: &NumberFormat) -> Option<RationalNumber> {
    let (body, divisor) = strip_symbol(text, &format.per_mille_symbol)
        .map(|body| (body, 1000))
        .or_else(|| strip_symbol(text, &format.percent_symbol).map(|body| (body, 100)))?;

    let value = parse_integer(body, format).or_else(|| parse_decimal(body, format))?;
    value.checked_div(RationalNumber::from_integer(divisor).ok()?).ok()
}

fn strip_symbol<'a>(text: &'a str, symbol: &str) -> Option<&'a str> {
    if symbol.is_empty() {
        return None;
    }
    text.strip_suffix(symbol)
        .or_else(|| text.strip_prefix(symbol))
        .map(str::trim)
}

// ============================================================================
// Fraction Notation
// ============================================================================

fn parse_fraction(text: &str, format: &NumberFormat) -> Option<RationalNumber> {
    let (negative, body) = split_sign(text, format);
    let chars: SmallVec<[char; 32]> = body.chars().collect();
    let Some(last) = chars.len().checked_sub(1) else {
        return reject(text, "sign without digits");
    };

    let mut state = ScanState::default();
    let mut run = DigitRun::new();
    let mut whole: Option<i64> = None;
    let mut numerator: Option<i64> = None;

    for (index, &c) in chars.iter().enumerate() {
        let at_end = index == last;

        if glyphs::is_fraction_bar(c) {
            if state.bar {
                return reject(text, "second fraction bar");
            }
            if at_end {
                return reject(text, "fraction bar without denominator");
            }
            numerator = Some(parse_run(&run).or_else(|| reject(text, "invalid numerator"))?);
            run.clear();
            state.bar = true;
            state.plain = false;
        } else if format.is_whole_separator(c) {
            if state.whole_separator || state.bar || state.superscript || at_end || run.is_empty() {
                return reject(text, "misplaced whole separator");
            }
            whole = Some(parse_run(&run).or_else(|| reject(text, "invalid whole part"))?);
            run.clear();
            state.whole_separator = true;
            state.plain = false;
        } else if let Some((glyph_numerator, glyph_denominator)) = glyphs::vulgar_fraction(c) {
            if !at_end || state.bar || state.whole_separator || state.superscript || state.subscript {
                return reject(text, "misplaced vulgar fraction");
            }
            let whole = if run.is_empty() {
                0
            } else {
                parse_run(&run).or_else(|| reject(text, "invalid whole part"))?
            };
            return compose(negative, whole, glyph_numerator, glyph_denominator);
        } else if let Some(digit) = glyphs::from_superscript(c) {
            if state.bar || state.subscript {
                return reject(text, "superscript outside the numerator");
            }
            if state.plain {
                // "1¹⁄₂": the plain run before the superscripts is the whole part
                if whole.is_some() {
                    return reject(text, "digits between whole part and numerator");
                }
                whole = Some(parse_run(&run).or_else(|| reject(text, "invalid whole part"))?);
                run.clear();
                state.plain = false;
            }
            state.superscript = true;
            run.push(digit);
        } else if let Some(digit) = glyphs::from_subscript(c) {
            if !state.bar || state.plain {
                return reject(text, "subscript outside the denominator");
            }
            state.subscript = true;
            run.push(digit);
        } else if c.is_ascii_digit() {
            if state.subscript || (state.superscript && !state.bar) {
                return reject(text, "plain digit after script digits");
            }
            state.plain = true;
            run.push(c);
        } else {
            // signs belong only in front of the whole text
            return reject(text, "unexpected character");
        }
    }

    if !state.bar {
        return reject(text, "no fraction bar");
    }

    let denominator = parse_run(&run)
        .filter(|&denominator| denominator != 0)
        .or_else(|| reject(text, "invalid denominator"))?;
    compose(negative, whole.unwrap_or(0), numerator?, denominator)
}

fn parse_run(run: &[char]) -> Option<i64> {
    if run.is_empty() {
        return None;
    }
    let text: String = run.iter().collect();
    text.parse::<i64>().ok().filter(|&value| value != i64::MIN)
}

/// `-(whole + numerator / denominator)` when `negative`.
fn compose(negative: bool, whole: i64, numerator: i64, denominator: i64) -> Option<RationalNumber> {
    let numerator = whole
        .checked_mul(denominator)
        .and_then(|scaled| scaled.checked_add(numerator))?;
    let value = RationalNumber::new(numerator, denominator).ok()?;
    Some(if negative { -value } else { value })
}

#[inline]
fn reject<T>(text: &str, reason: &'static str) -> Option<T> {
    tracing::trace!(text, reason, "fraction text rejected");
    None
}
