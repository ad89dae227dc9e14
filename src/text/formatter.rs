// ============================================================================
// Fraction Formatter
// Pattern-driven rendering of rationals as fractions or mixed numbers
// ============================================================================

use super::glyphs;
use super::standard::{format_decimal, format_integer};
use super::NumberFormat;
use crate::numeric::{NumericResult, RationalNumber};
use arrayvec::ArrayString;

/// Keyword rendering a part as superscript digits.
pub const SUPERSCRIPT: &str = "super";
/// Keyword rendering a part as subscript digits.
pub const SUBSCRIPT: &str = "sub";

/// A fraction pattern split at its bar: `[whole ]numerator<bar>denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Template<'a> {
    whole: Option<&'a str>,
    numerator: &'a str,
    bar: char,
    denominator: &'a str,
}

impl<'a> Template<'a> {
    /// `None` when the pattern has no fraction bar.
    fn parse(pattern: &'a str) -> Option<Self> {
        let (index, bar) = pattern
            .char_indices()
            .find(|&(_, c)| glyphs::is_fraction_bar(c))?;
        let head = &pattern[..index];
        let denominator = &pattern[index + bar.len_utf8()..];

        let (whole, numerator) = match head.rfind(' ') {
            Some(space) => (Some(&head[..space]), &head[space + 1..]),
            None => (None, head),
        };

        Some(Self {
            whole,
            numerator,
            bar,
            denominator,
        })
    }
}

/// Render `value` with a fraction pattern.
///
/// Each part of the pattern is `super`, `sub`, or a standard integer format
/// (`G`, `D3`, `N0`, ...):
///
/// | pattern        | 7/4         |
/// |----------------|-------------|
/// | `/`            | `7/4`       |
/// | `G G/G`        | `1 3/4`     |
/// | `super⁄sub`    | `⁷⁄₄`       |
/// | `G super⁄sub`  | `1 ³⁄₄`     |
/// | `F2`           | `1.75`      |
///
/// A pattern without a bar formats the decimal quotient with the standard
/// format instead. With a whole part, a zero remainder prints only the whole
/// part, and a negative value whose whole part is zero keeps its sign on the
/// zero (`-0 1/3`).
///
/// # Errors
/// `InvalidFormat` if a part is not a recognised format.
pub fn format(value: RationalNumber, pattern: &str, format: &NumberFormat) -> NumericResult<String> {
    let Some(template) = Template::parse(pattern) else {
        return format_decimal(value.to_decimal(), pattern, format);
    };

    let numerator = value.numerator();
    let denominator = value.denominator();

    let Some(whole_pattern) = template.whole else {
        let mut out = render(numerator, template.numerator, format)?;
        out.push(template.bar);
        out.push_str(&render(denominator, template.denominator, format)?);
        return Ok(out);
    };

    let whole = numerator / denominator;
    let remainder = (numerator % denominator).abs();

    let mut out = render(whole, whole_pattern, format)?;
    if value.is_negative() && whole == 0 {
        out.insert_str(0, &format.negative_sign);
    }
    if remainder == 0 {
        return Ok(out);
    }

    out.push(' ');
    out.push_str(&render(remainder, template.numerator, format)?);
    out.push(template.bar);
    out.push_str(&render(denominator, template.denominator, format)?);
    Ok(out)
}

impl RationalNumber {
    /// See [`format`].
    #[inline]
    pub fn format(self, pattern: &str, number_format: &NumberFormat) -> NumericResult<String> {
        format(self, pattern, number_format)
    }
}

fn render(value: i64, pattern: &str, format: &NumberFormat) -> NumericResult<String> {
    let pattern = pattern.trim();
    if pattern.eq_ignore_ascii_case(SUPERSCRIPT) {
        Ok(scripted(value, glyphs::to_superscript, format))
    } else if pattern.eq_ignore_ascii_case(SUBSCRIPT) {
        Ok(scripted(value, glyphs::to_subscript, format))
    } else {
        format_integer(value, pattern, format)
    }
}

fn scripted(value: i64, glyph: fn(char) -> char, format: &NumberFormat) -> String {
    // 19 digits of at most 3 UTF-8 bytes each
    let mut digits = ArrayString::<64>::new();
    let mut magnitude = value.unsigned_abs();
    loop {
        digits.push(glyph(char::from(b'0' + (magnitude % 10) as u8)));
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }

    let mut out = String::with_capacity(digits.len() + format.negative_sign.len());
    if value < 0 {
        out.push_str(&format.negative_sign);
    }
    out.extend(digits.chars().rev());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;
    use crate::text::try_parse;
    use proptest::prelude::*;

    fn r(n: i64, d: i64) -> RationalNumber {
        RationalNumber::new(n, d).unwrap()
    }

    fn invariant(value: RationalNumber, pattern: &str) -> String {
        format(value, pattern, &NumberFormat::invariant()).unwrap()
    }

    #[test]
    fn test_template_split() {
        let template = Template::parse("G super⁄sub").unwrap();
        assert_eq!(template.whole, Some("G"));
        assert_eq!(template.numerator, "super");
        assert_eq!(template.bar, '⁄');
        assert_eq!(template.denominator, "sub");

        assert_eq!(Template::parse("F2"), None);
        assert_eq!(Template::parse("/").unwrap().whole, None);
    }

    #[test]
    fn test_plain_fractions() {
        assert_eq!(invariant(r(7, 4), "/"), "7/4");
        assert_eq!(invariant(r(-7, 4), "G/G"), "-7/4");
        assert_eq!(invariant(r(3, 1), "G/G"), "3/1");
        assert_eq!(invariant(r(1, 2), "G:G"), "1:2");
        assert_eq!(invariant(r(1, 2), "D2/D2"), "01/02");
        assert_eq!(invariant(RationalNumber::ZERO, "/"), "0/1");
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(invariant(r(7, 4), "G G/G"), "1 3/4");
        assert_eq!(invariant(r(-7, 4), "G G/G"), "-1 3/4");
        assert_eq!(invariant(r(-1, 3), "G G/G"), "-0 1/3");
        assert_eq!(invariant(r(1, 3), "G G/G"), "0 1/3");
        assert_eq!(invariant(r(8, 4), "G G/G"), "2");
        assert_eq!(invariant(r(-2, 1), "G G/G"), "-2");
        assert_eq!(invariant(RationalNumber::ZERO, "G G/G"), "0");
    }

    #[test]
    fn test_script_digits() {
        assert_eq!(invariant(r(7, 4), "super⁄sub"), "⁷⁄₄");
        assert_eq!(invariant(r(7, 4), "G super⁄sub"), "1 ³⁄₄");
        assert_eq!(invariant(r(-123, 1000), "super/sub"), "-¹²³/₁₀₀₀");
        assert_eq!(invariant(r(1, 10), "SUPER/SUB"), "¹/₁₀");
    }

    #[test]
    fn test_locale_signs_and_groups() {
        let format = NumberFormat::invariant().with_negative_sign("\u{2212}");
        assert_eq!(
            super::format(r(-1, 3), "G G/G", &format).unwrap(),
            "\u{2212}0 1/3"
        );
        assert_eq!(
            super::format(r(1234567, 2), "N0 N0/N0", &NumberFormat::de_de()).unwrap(),
            "617.283 1/2"
        );
    }

    #[test]
    fn test_decimal_fallback() {
        assert_eq!(invariant(r(7, 4), "F2"), "1.75");
        assert_eq!(invariant(r(2, 3), "F3"), "0.667");
        assert_eq!(invariant(r(-2, 3), "F3"), "-0.667");
        assert_eq!(invariant(r(1, 8), "G"), "0.125");
        assert_eq!(invariant(r(1, 8), "P1"), "12.5 %");
        assert_eq!(
            super::format(r(3, 2), "N1", &NumberFormat::de_de()).unwrap(),
            "1,5"
        );
    }

    #[test]
    fn test_invalid_patterns() {
        assert_eq!(
            format(r(1, 2), "X/G", &NumberFormat::invariant()),
            Err(NumericError::InvalidFormat)
        );
        assert_eq!(
            format(r(1, 2), "Q", &NumberFormat::invariant()),
            Err(NumericError::InvalidFormat)
        );
        assert_eq!(
            r(1, 2).format("G/G", &NumberFormat::invariant()).unwrap(),
            "1/2"
        );
    }

    const ROUND_TRIP_PATTERNS: [&str; 9] = [
        "/",
        "G/G",
        "D3/D",
        "G:G",
        "G÷G",
        "G G/G",
        "super⁄sub",
        "G super⁄sub",
        "super/G",
    ];

    proptest! {
        #[test]
        fn prop_format_then_parse(
            n in -10_000_000i64..10_000_000,
            d in 1i64..100_000,
            pattern in proptest::sample::select(ROUND_TRIP_PATTERNS.to_vec()),
        ) {
            let value = r(n, d);
            let text = invariant(value, pattern);
            prop_assert_eq!(
                try_parse(&text, &NumberFormat::invariant()),
                Some(value),
                "pattern {:?} rendered {:?}", pattern, text
            );
        }
    }
}
