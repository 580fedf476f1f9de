//! ECB and CBC chaining over the block transform.
//!
//! Every driver expects a block-aligned buffer. The façade pads and validates
//! before calling in here.

use core::fmt;
use core::str::FromStr;

use crate::block::{blocks, xor_in_place, Block};
use crate::cipher::{decrypt_block, encrypt_block};
use crate::schedule::RoundKeys;

/// Block chaining mode.
///
/// ECB leaks equal-plaintext-block patterns and is kept for compatibility and
/// testing only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook: every block is encrypted independently.
    Ecb,
    /// Cipher block chaining seeded by a 16-byte IV.
    #[default]
    Cbc,
}

impl Mode {
    /// Whether the mode consumes an initialization vector.
    pub fn requires_iv(self) -> bool {
        matches!(self, Mode::Cbc)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ecb => f.write_str("ECB"),
            Mode::Cbc => f.write_str("CBC"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ecb" => Ok(Mode::Ecb),
            "cbc" => Ok(Mode::Cbc),
            other => Err(format!("unknown mode {other:?}, expected cbc/ecb")),
        }
    }
}

/// Encrypts each block independently.
pub fn ecb_encrypt(round_keys: &RoundKeys, plaintext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(plaintext.len());
    for block in blocks(plaintext) {
        out.extend_from_slice(&encrypt_block(&block, round_keys));
    }
    out
}

/// Decrypts each block independently. Padding is left in place.
pub fn ecb_decrypt(round_keys: &RoundKeys, ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ciphertext.len());
    for block in blocks(ciphertext) {
        out.extend_from_slice(&decrypt_block(&block, round_keys));
    }
    out
}

/// CBC encryption: each plaintext block is XORed with the previous ciphertext
/// block (the IV for the first) before encryption.
pub fn cbc_encrypt(round_keys: &RoundKeys, iv: &Block, plaintext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(plaintext.len());
    let mut prev = *iv;
    for mut block in blocks(plaintext) {
        xor_in_place(&mut block, &prev);
        prev = encrypt_block(&block, round_keys);
        out.extend_from_slice(&prev);
    }
    out
}

/// CBC decryption. The chaining value is the previous *ciphertext* block.
pub fn cbc_decrypt(round_keys: &RoundKeys, iv: &Block, ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ciphertext.len());
    let mut prev = *iv;
    for block in blocks(ciphertext) {
        let mut plain = decrypt_block(&block, round_keys);
        xor_in_place(&mut plain, &prev);
        out.extend_from_slice(&plain);
        prev = block;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use crate::schedule::expand_key;

    fn schedule(bytes: &[u8]) -> RoundKeys {
        expand_key(&Key::new(bytes).unwrap())
    }

    #[test]
    fn ecb_encrypts_equal_blocks_identically() {
        let rks = schedule(&[7u8; 16]);
        let ct = ecb_encrypt(&rks, &[0x33u8; 48]);
        assert_eq!(ct.len(), 48);
        assert_eq!(ct[..16], ct[16..32]);
        assert_eq!(ct[16..32], ct[32..]);
        assert_eq!(ecb_decrypt(&rks, &ct), vec![0x33u8; 48]);
    }

    #[test]
    fn cbc_hides_equal_blocks() {
        let rks = schedule(&[7u8; 32]);
        let iv = [1u8; 16];
        let ct = cbc_encrypt(&rks, &iv, &[0x33u8; 48]);
        assert_ne!(ct[..16], ct[16..32]);
        assert_ne!(ct[16..32], ct[32..]);
        assert_eq!(cbc_decrypt(&rks, &iv, &ct), vec![0x33u8; 48]);
    }

    #[test]
    fn cbc_first_block_is_ecb_of_block_xor_iv() {
        let rks = schedule(&[9u8; 16]);
        let iv: Block = core::array::from_fn(|i| i as u8);
        let plain = [0xa5u8; 16];
        let mut mixed = plain;
        xor_in_place(&mut mixed, &iv);
        assert_eq!(cbc_encrypt(&rks, &iv, &plain), ecb_encrypt(&rks, &mixed));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let rks = schedule(&[0u8; 16]);
        assert!(ecb_encrypt(&rks, &[]).is_empty());
        assert!(cbc_decrypt(&rks, &[0u8; 16], &[]).is_empty());
    }

    #[test]
    fn parses_names() {
        assert_eq!("CBC".parse::<Mode>(), Ok(Mode::Cbc));
        assert_eq!("ecb".parse::<Mode>(), Ok(Mode::Ecb));
        assert!("gcm".parse::<Mode>().is_err());
        assert!(Mode::Cbc.requires_iv());
        assert!(!Mode::Ecb.requires_iv());
    }
}
