// ============================================================================
// Fraction Glyphs
// Fraction bars, vulgar fractions, superscript and subscript digits
// ============================================================================

/// Code points accepted as the bar between numerator and denominator.
pub const FRACTION_BARS: [char; 7] = [
    '/',        // solidus
    ':',        // colon (ratio)
    '÷',        // division sign
    '\u{2044}', // fraction slash
    '\u{2215}', // division slash
    '\u{0337}', // combining short solidus overlay
    '\u{0338}', // combining long solidus overlay
];

/// Superscript digits 0-9. One, two and three live in Latin-1, not in the
/// U+2070 block.
pub const SUPERSCRIPT_DIGITS: [char; 10] = [
    '\u{2070}', '\u{00B9}', '\u{00B2}', '\u{00B3}', '\u{2074}', '\u{2075}', '\u{2076}', '\u{2077}',
    '\u{2078}', '\u{2079}',
];

/// Subscript digits 0-9.
pub const SUBSCRIPT_DIGITS: [char; 10] = [
    '\u{2080}', '\u{2081}', '\u{2082}', '\u{2083}', '\u{2084}', '\u{2085}', '\u{2086}', '\u{2087}',
    '\u{2088}', '\u{2089}',
];

/// Single code point fractions as `(glyph, numerator, denominator)`.
pub const VULGAR_FRACTIONS: [(char, i64, i64); 19] = [
    ('½', 1, 2),
    ('⅓', 1, 3),
    ('⅔', 2, 3),
    ('¼', 1, 4),
    ('¾', 3, 4),
    ('⅕', 1, 5),
    ('⅖', 2, 5),
    ('⅗', 3, 5),
    ('⅘', 4, 5),
    ('⅙', 1, 6),
    ('⅚', 5, 6),
    ('⅐', 1, 7),
    ('⅛', 1, 8),
    ('⅜', 3, 8),
    ('⅝', 5, 8),
    ('⅞', 7, 8),
    ('⅑', 1, 9),
    ('⅒', 1, 10),
    ('↉', 0, 3),
];

#[inline]
pub fn is_fraction_bar(c: char) -> bool {
    FRACTION_BARS.contains(&c)
}

/// `(numerator, denominator)` of a vulgar fraction glyph.
#[inline]
pub fn vulgar_fraction(c: char) -> Option<(i64, i64)> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(glyph, _, _)| *glyph == c)
        .map(|&(_, numerator, denominator)| (numerator, denominator))
}

/// ASCII digit for a superscript digit glyph.
#[inline]
pub fn from_superscript(c: char) -> Option<char> {
    position_digit(&SUPERSCRIPT_DIGITS, c)
}

/// ASCII digit for a subscript digit glyph.
#[inline]
pub fn from_subscript(c: char) -> Option<char> {
    position_digit(&SUBSCRIPT_DIGITS, c)
}

/// Superscript glyph for an ASCII digit; other characters pass through.
#[inline]
pub fn to_superscript(c: char) -> char {
    c.to_digit(10)
        .map_or(c, |digit| SUPERSCRIPT_DIGITS[digit as usize])
}

/// Subscript glyph for an ASCII digit; other characters pass through.
#[inline]
pub fn to_subscript(c: char) -> char {
    c.to_digit(10)
        .map_or(c, |digit| SUBSCRIPT_DIGITS[digit as usize])
}

fn position_digit(table: &[char; 10], c: char) -> Option<char> {
    table
        .iter()
        .position(|&glyph| glyph == c)
        .and_then(|digit| char::from_digit(digit as u32, 10))
}
