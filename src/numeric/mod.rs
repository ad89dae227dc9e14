// ============================================================================
// Numeric Module
// Exact i64 rational arithmetic with overflow-checked operations
// ============================================================================
//
// This module provides:
// - RationalNumber: reduced numerator/denominator pair over i64
// - NumericError: Error types for arithmetic, conversion and parsing
// - gcd: binary-stripping Euclidean GCD
//
// Design principles:
// - Every value is reduced; equal values have equal fields
// - All checked arithmetic returns Result (no wraps, no saturation)
// - i64::MIN never appears in either field

mod errors;
pub mod gcd;
mod rational;

pub use errors::{NumericError, NumericResult};
pub use rational::RationalNumber;
