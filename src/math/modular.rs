//! Modular exponentiation over `u64`.
//!
//! Products are taken in `u128`, so any `u64` modulus is safe from overflow.

/// Computes `base^exp mod modulus` by square-and-multiply.
///
/// A modulus of 1 maps everything to 0. A modulus of 0 is a caller bug and panics
/// like any other division by zero.
pub fn mod_pow(base: u64, exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut base = base as u128 % m;
    let mut exp = exp;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }

    result as u64
}

/// Computes `a * b mod modulus` without overflowing.
pub fn mod_mul(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}
