//! AES round transformations.
//!
//! The state is stored column-major, as in FIPS-197: byte `r + 4c` holds row `r`
//! of column `c`.

use crate::block::{xor_in_place, Block, BLOCK_SIZE};
use crate::gf::{gmul, xtime};
use crate::sbox::{inv_sbox, sbox};

/// Source index for each output byte of ShiftRows (row `r` rotates left by `r`).
const SHIFT_ROWS: [usize; BLOCK_SIZE] = [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];

/// Source index for each output byte of InvShiftRows.
const INV_SHIFT_ROWS: [usize; BLOCK_SIZE] = [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

fn permute(state: &mut Block, sources: &[usize; BLOCK_SIZE]) {
    let src = *state;
    for (dst, &from) in state.iter_mut().zip(sources.iter()) {
        *dst = src[from];
    }
}

/// Performs ShiftRows in place.
#[inline]
pub fn shift_rows(state: &mut Block) {
    permute(state, &SHIFT_ROWS);
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    permute(state, &INV_SHIFT_ROWS);
}

fn mix_single_column(col: &mut [u8]) {
    let (a0, a1, a2, a3) = (col[0], col[1], col[2], col[3]);
    col[0] = xtime(a0) ^ (xtime(a1) ^ a1) ^ a2 ^ a3;
    col[1] = a0 ^ xtime(a1) ^ (xtime(a2) ^ a2) ^ a3;
    col[2] = a0 ^ a1 ^ xtime(a2) ^ (xtime(a3) ^ a3);
    col[3] = (xtime(a0) ^ a0) ^ a1 ^ a2 ^ xtime(a3);
}

fn inv_mix_single_column(col: &mut [u8]) {
    let (a0, a1, a2, a3) = (col[0], col[1], col[2], col[3]);
    col[0] = gmul(a0, 0x0e) ^ gmul(a1, 0x0b) ^ gmul(a2, 0x0d) ^ gmul(a3, 0x09);
    col[1] = gmul(a0, 0x09) ^ gmul(a1, 0x0e) ^ gmul(a2, 0x0b) ^ gmul(a3, 0x0d);
    col[2] = gmul(a0, 0x0d) ^ gmul(a1, 0x09) ^ gmul(a2, 0x0e) ^ gmul(a3, 0x0b);
    col[3] = gmul(a0, 0x0b) ^ gmul(a1, 0x0d) ^ gmul(a2, 0x09) ^ gmul(a3, 0x0e);
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        mix_single_column(column);
    }
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        inv_mix_single_column(column);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}
