//! Substitution boxes and round constants.
//!
//! Both boxes are computed at compile time from the field inverse and the AES
//! affine transform, so there is no runtime initialisation.

use crate::gf::ginv;

/// Round constants for key expansion, `x^(i-1)` for `i` in `1..=10`.
pub(crate) const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = affine(ginv(i as u8));
        i += 1;
    }
    table
}

const fn build_inv_sbox(forward: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[forward[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const SBOX: [u8; 256] = build_sbox();
const INV_SBOX: [u8; 256] = build_inv_sbox(&SBOX);

/// Forward S-box.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Inverse S-box.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}
