// ============================================================================
// Decimal Module
// Word-level rounding engine for 96-bit base-10 floating decimals
// ============================================================================
//
// This module provides:
// - DecimalWords: lo/mid/hi magnitude words + scale + sign
// - RoundingMode: closed set of directed and round-to-nearest policies
// - round / round_with_rng / rescale / trim over DecimalWords
// - DecimalRoundingExt: the same operations on rust_decimal::Decimal
//
// Design principles:
// - Mutation stays inside one call; inputs and outputs are Copy values
// - Divisors never exceed 10^9 so every step fits u64 arithmetic
// - Carries out of the top word are Overflow errors, never wraps
// - Randomness only for Stochastic and RandomTieBreak

mod ext;
mod rounding;
mod words;

pub use ext::DecimalRoundingExt;
pub(crate) use rounding::{should_round_up, Discarded};
pub use rounding::{
    rescale, round, round_with_rng, trim, RoundingMode, MAX_TARGET_SCALE, MIN_TARGET_SCALE,
};
pub use words::{DecimalWords, MAX_SCALE};
