// ============================================================================
// Fraction Tour Example
// ============================================================================
//
// Run with:
//   RUST_LOG=exact_fraction=trace cargo run --example fraction_tour --features logging

use exact_fraction::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), NumericError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Exact Fraction Tour ===\n");

    let locale = NumberFormat::invariant();

    // Parsing the supported notations
    println!("Parsing...");
    for text in ["3/4", "1 1/2", "¾", "1¹⁄₂", "-2 5/16", "0.375", "12.5 %", "1//2"] {
        match try_parse(text, &locale) {
            Some(value) => println!("  {text:>8} -> {value}"),
            None => println!("  {text:>8} -> (rejected)"),
        }
    }

    // Arithmetic stays exact
    println!("\n=== Arithmetic ===");
    let a = parse("2 3/4", &locale)?;
    let b = parse("5/6", &locale)?;
    println!("  a + b = {}", format(a.checked_add(b)?, "G G/G", &locale)?);
    println!("  a * b = {}", format(a.checked_mul(b)?, "G G/G", &locale)?);
    println!("  a / b = {}", format(a.checked_div(b)?, "G super⁄sub", &locale)?);
    println!("  b ^ 3 = {}", b.checked_pow(3)?);

    match RationalNumber::MAX.checked_add(RationalNumber::ONE) {
        Ok(value) => println!("  MAX + 1 = {value}"),
        Err(e) => println!("  MAX + 1 fails: {e}"),
    }

    // Decimal approximation
    println!("\n=== Approximation ===");
    let pi = Decimal::from_str("3.14159265358979").unwrap_or_default();
    for digits in [2u32, 4, 7] {
        let error = Decimal::new(1, digits);
        let x = approximate(pi, error)?;
        println!("  pi within {error}: {x} = {}", x.to_decimal_rounded(10, RoundingMode::ToEven)?);
    }

    // Rounding modes on the same tie
    println!("\n=== Rounding 2.5 and -2.5 ===");
    for mode in [
        RoundingMode::ToEven,
        RoundingMode::ToOdd,
        RoundingMode::HalfAwayFromZero,
        RoundingMode::HalfTowardZero,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
    ] {
        let up = Decimal::new(25, 1).round_with_mode(0, mode)?;
        let down = Decimal::new(-25, 1).round_with_mode(0, mode)?;
        println!("  {:<18} {up:>3} {down:>3}", format!("{mode:?}"));
    }

    // Locale-specific text
    println!("\n=== Locales ===");
    let german = NumberFormat::de_de();
    let value = parse("1.234,5", &german)?;
    println!("  de-DE 1.234,5 -> {value} -> {}", format(value, "N2", &german)?);

    let french = NumberFormat::fr_fr();
    let value = parse("3+1/4", &french)?;
    println!("  fr-FR 3+1/4 -> {value} -> {}", format(value, "F2", &french)?);

    Ok(())
}
