// ============================================================================
// Text Module
// Reading and writing rationals in integer, decimal and fraction notations
// ============================================================================
//
// This module provides:
// - NumberFormat: locale separators and symbols, with presets
// - try_parse / parse: text -> RationalNumber
// - format: RationalNumber -> text through a fraction pattern
// - glyph tables for bars, vulgar fractions and script digits
//
// Design principles:
// - try_parse is total: malformed or overflowing text is None, never a panic
// - The formatter only emits notations the parser reads back
// - Fraction text is scanned once, left to right

pub mod glyphs;
mod formatter;
mod number_format;
mod parser;
mod standard;

pub use formatter::{format, SUBSCRIPT, SUPERSCRIPT};
pub use number_format::NumberFormat;
pub use parser::{parse, try_parse};
pub use standard::{format_decimal, format_integer};
