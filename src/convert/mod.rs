// ============================================================================
// Convert Module
// Bridges between RationalNumber and the 96-bit decimal boundary type
// ============================================================================
//
// This module provides:
// - approximate(): smallest-denominator rational within an error of a decimal
// - TryFrom<Decimal> for RationalNumber: exact intake
// - RationalNumber::to_decimal / to_f64 / to_decimal_rounded
//
// Design principles:
// - Decimal -> rational never rounds; it is exact or an explicit approximation
// - Rational -> decimal is plain division, bounded by the target precision

mod approximation;
mod cast;

pub use approximation::approximate;
