// ============================================================================
// Greatest Common Divisor
// Euclidean GCD with the shared power-of-two factor stripped first
// ============================================================================

/// Greatest common divisor of two unsigned values.
///
/// Common factors of two are shifted out before the remainder loop runs, so
/// operands like `2^40 * a` and `2^40 * b` do not pay for forty extra
/// Euclidean steps. `gcd(0, x) == x`.
#[inline]
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }

    let mut shift = 0u32;
    while (a | b) & 1 == 0 {
        a >>= 1;
        b >>= 1;
        shift += 1;
    }

    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }

    a << shift
}

/// GCD of a signed value's magnitude and a positive value.
///
/// Callers guarantee neither argument is `i64::MIN`, so the result always
/// fits back into an i64.
#[inline]
pub(crate) fn gcd_i64(a: i64, b: i64) -> i64 {
    gcd(a.unsigned_abs(), b.unsigned_abs()) as i64
}
