//! AES key expansion for 128- and 256-bit keys.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{Block, BLOCK_SIZE};
use crate::key::{Key, KeySize};
use crate::sbox::{sbox, RCON};

/// Round keys for the largest variant (AES-256, 14 rounds).
const MAX_ROUND_KEYS: usize = 15;

/// Expanded round keys. Wiped when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    #[zeroize(skip)]
    size: KeySize,
}

impl RoundKeys {
    /// Returns the round key at the requested index (`0..=rounds()`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        debug_assert!(round <= self.rounds());
        &self.keys[round]
    }

    /// Number of rounds these keys drive.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// Variant the keys were expanded for.
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Round keys actually in use (`rounds() + 1` entries).
    pub fn as_blocks(&self) -> &[Block] {
        &self.keys[..=self.rounds()]
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoundKeys")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_be_bytes();
    u32::from_be_bytes([sbox(b0), sbox(b1), sbox(b2), sbox(b3)])
}

/// Expands a validated key into `rounds + 1` round keys.
pub fn expand_key(key: &Key<'_>) -> RoundKeys {
    let size = key.size();
    let nk = size.key_words();
    let total_words = 4 * (size.rounds() + 1);

    let mut w = [0u32; 4 * MAX_ROUND_KEYS];
    for (word, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[(i / nk) - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut keys = [[0u8; BLOCK_SIZE]; MAX_ROUND_KEYS];
    for (round_key, words) in keys.iter_mut().zip(w[..total_words].chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(&word.to_be_bytes());
        }
    }
    w.zeroize();

    RoundKeys { keys, size }
}
