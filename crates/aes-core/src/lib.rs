//! AES-128/256 block cipher with ECB and CBC chaining and PKCS#7 padding.
//!
//! This crate implements FIPS-197 directly and provides:
//! - GF(2^8) arithmetic and compile-time S-box tables.
//! - Key expansion for 16- and 32-byte keys.
//! - Single-block encryption and decryption.
//! - ECB and CBC drivers, PKCS#7 padding, and validating [`encrypt`]/[`decrypt`]
//!   entry points.
//! - Hex helpers for text front-ends.
//!
//! ```
//! use aes_core::{decrypt, encrypt, Mode, Padding};
//!
//! let key = [0x2b; 16];
//! let iv = [0x00; 16];
//! let ct = encrypt(Mode::Cbc, Padding::Pkcs7, &key, Some(&iv), b"hello").unwrap();
//! let pt = decrypt(Mode::Cbc, Padding::Pkcs7, &key, Some(&iv), &ct).unwrap();
//! assert_eq!(pt, b"hello");
//! ```
//!
//! Padding checks are constant-time, but the S-box is a table lookup, so the
//! cipher should not be treated as side-channel hardened. ECB leaks repeated
//! plaintext blocks and is available for compatibility only. CBC provides no
//! integrity; IV uniqueness per key is the caller's responsibility.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod encoding;
mod engine;
mod error;
mod gf;
mod key;
pub mod modes;
pub mod padding;
mod round;
mod sbox;
mod schedule;

pub use crate::block::{is_block_aligned, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block};
pub use crate::engine::{
    aes_cbc_decrypt, aes_cbc_encrypt, aes_ecb_decrypt, aes_ecb_encrypt, decrypt, encrypt,
    CipherConfig,
};
pub use crate::error::{Error, Result};
pub use crate::gf::{gmul, xtime};
pub use crate::key::{Key, KeySize};
pub use crate::modes::Mode;
pub use crate::padding::{pkcs7_pad, pkcs7_unpad, Padding};
pub use crate::sbox::{inv_sbox, sbox};
pub use crate::schedule::{expand_key, RoundKeys};
