//! Single-block AES encryption and decryption.

use crate::block::Block;
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::schedule::RoundKeys;

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use crate::schedule::expand_key;
    use rand::RngCore;

    const FIPS_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const FIPS_CIPHER_128: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];
    const FIPS_CIPHER_256: [u8; 16] = [
        0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60,
        0x89,
    ];

    fn counting_key<const N: usize>() -> [u8; N] {
        core::array::from_fn(|i| i as u8)
    }

    fn schedule(bytes: &[u8]) -> RoundKeys {
        expand_key(&Key::new(bytes).unwrap())
    }

    #[test]
    fn aes128_matches_fips_appendix_c1() {
        let rks = schedule(&counting_key::<16>());
        assert_eq!(encrypt_block(&FIPS_PLAIN, &rks), FIPS_CIPHER_128);
        assert_eq!(decrypt_block(&FIPS_CIPHER_128, &rks), FIPS_PLAIN);
    }

    #[test]
    fn aes256_matches_fips_appendix_c3() {
        let rks = schedule(&counting_key::<32>());
        assert_eq!(encrypt_block(&FIPS_PLAIN, &rks), FIPS_CIPHER_256);
        assert_eq!(decrypt_block(&FIPS_CIPHER_256, &rks), FIPS_PLAIN);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for key_len in [16, 32] {
            for _ in 0..100 {
                let mut key_bytes = vec![0u8; key_len];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key_bytes);
                rng.fill_bytes(&mut block);
                let rks = schedule(&key_bytes);
                let ct = encrypt_block(&block, &rks);
                assert_ne!(ct, block);
                assert_eq!(decrypt_block(&ct, &rks), block);
            }
        }
    }
}
