//! Arithmetic in GF(2^8) modulo the AES polynomial x^8 + x^4 + x^3 + x + 1.

/// Low byte of the reduction polynomial 0x11B.
const REDUCTION: u8 = 0x1b;

/// Multiplies by `x` (0x02) in GF(2^8).
#[inline]
pub const fn xtime(byte: u8) -> u8 {
    // 0xff when the high bit is set, 0x00 otherwise.
    let mask = (byte >> 7).wrapping_neg();
    (byte << 1) ^ (mask & REDUCTION)
}

/// Multiplies two field elements.
///
/// Runs a fixed eight iterations and selects with masks instead of branching on
/// the operands.
pub const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    let mut i = 0;
    while i < 8 {
        product ^= a & (b & 1).wrapping_neg();
        a = xtime(a);
        b >>= 1;
        i += 1;
    }
    product
}

/// Multiplicative inverse, computed as `x^254`. Maps zero to zero.
pub const fn ginv(x: u8) -> u8 {
    let x2 = gmul(x, x);
    let x3 = gmul(x2, x);
    let x6 = gmul(x3, x3);
    let x12 = gmul(x6, x6);
    let x15 = gmul(x12, x3);
    let x30 = gmul(x15, x15);
    let x60 = gmul(x30, x30);
    let x120 = gmul(x60, x60);
    let x126 = gmul(x120, x6);
    let x127 = gmul(x126, x);
    gmul(x127, x127)
}
