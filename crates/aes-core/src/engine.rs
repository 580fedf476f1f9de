//! Validating entry points over the chaining modes.
//!
//! Every check runs before the key schedule is built, so a rejected call does
//! no cryptographic work and produces no partial output.

use log::{debug, trace};

use crate::block::{Block, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::key::Key;
use crate::modes::{cbc_decrypt, cbc_encrypt, ecb_decrypt, ecb_encrypt, Mode};
use crate::padding::{check_aligned, Padding};
use crate::schedule::expand_key;

/// Mode and padding selection for a cipher call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CipherConfig {
    /// Block chaining mode.
    pub mode: Mode,
    /// Padding policy applied around the mode.
    pub padding: Padding,
}

impl CipherConfig {
    /// Creates a configuration.
    pub fn new(mode: Mode, padding: Padding) -> Self {
        Self { mode, padding }
    }

    /// Encrypts with this configuration. See [`encrypt`].
    pub fn encrypt(&self, key: &[u8], iv: Option<&[u8]>, plaintext: &[u8]) -> Result<Vec<u8>> {
        encrypt(self.mode, self.padding, key, iv, plaintext)
    }

    /// Decrypts with this configuration. See [`decrypt`].
    pub fn decrypt(&self, key: &[u8], iv: Option<&[u8]>, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt(self.mode, self.padding, key, iv, ciphertext)
    }
}

/// Mode with its IV resolved.
enum Chaining {
    Ecb,
    Cbc(Block),
}

fn resolve_chaining(mode: Mode, iv: Option<&[u8]>) -> Result<Chaining> {
    match mode {
        Mode::Ecb => {
            if iv.is_some() {
                debug!("ignoring IV supplied for ECB");
            }
            Ok(Chaining::Ecb)
        }
        Mode::Cbc => {
            let iv = iv.ok_or(Error::Iv { actual: None })?;
            let block: Block = iv.try_into().map_err(|_| Error::Iv {
                actual: Some(iv.len()),
            })?;
            Ok(Chaining::Cbc(block))
        }
    }
}

/// Encrypts `plaintext`.
///
/// Checks, in order: key length (16 or 32), IV presence and length for CBC,
/// then plaintext alignment when `padding` is [`Padding::None`].
pub fn encrypt(
    mode: Mode,
    padding: Padding,
    key: &[u8],
    iv: Option<&[u8]>,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let key = Key::new(key)?;
    let chaining = resolve_chaining(mode, iv)?;
    let input = padding.apply(plaintext)?;

    debug!(
        "encrypt {} {mode} padding={padding}: {} -> {} bytes",
        key.size(),
        plaintext.len(),
        input.len()
    );
    let round_keys = expand_key(&key);
    let output = match chaining {
        Chaining::Ecb => ecb_encrypt(&round_keys, &input),
        Chaining::Cbc(iv) => cbc_encrypt(&round_keys, &iv, &input),
    };
    trace!("encrypted {} blocks", output.len() / BLOCK_SIZE);
    Ok(output)
}

/// Decrypts `ciphertext`, which must be block-aligned whatever the padding.
///
/// Key and IV are checked exactly as in [`encrypt`]. With [`Padding::Pkcs7`]
/// a failed integrity check yields [`Error::Padding`].
pub fn decrypt(
    mode: Mode,
    padding: Padding,
    key: &[u8],
    iv: Option<&[u8]>,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let key = Key::new(key)?;
    let chaining = resolve_chaining(mode, iv)?;
    check_aligned("ciphertext", ciphertext.len())?;

    debug!(
        "decrypt {} {mode} padding={padding}: {} bytes",
        key.size(),
        ciphertext.len()
    );
    let round_keys = expand_key(&key);
    let decrypted = match chaining {
        Chaining::Ecb => ecb_decrypt(&round_keys, ciphertext),
        Chaining::Cbc(iv) => cbc_decrypt(&round_keys, &iv, ciphertext),
    };
    padding.strip(decrypted)
}

/// AES-CBC encryption with a required IV.
pub fn aes_cbc_encrypt(
    plaintext: &[u8],
    key: &[u8],
    iv: &[u8],
    padding: Padding,
) -> Result<Vec<u8>> {
    encrypt(Mode::Cbc, padding, key, Some(iv), plaintext)
}

/// AES-CBC decryption with a required IV.
pub fn aes_cbc_decrypt(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8],
    padding: Padding,
) -> Result<Vec<u8>> {
    decrypt(Mode::Cbc, padding, key, Some(iv), ciphertext)
}

/// AES-ECB encryption. Equal plaintext blocks give equal ciphertext blocks.
pub fn aes_ecb_encrypt(plaintext: &[u8], key: &[u8], padding: Padding) -> Result<Vec<u8>> {
    encrypt(Mode::Ecb, padding, key, None, plaintext)
}

/// AES-ECB decryption.
pub fn aes_ecb_decrypt(ciphertext: &[u8], key: &[u8], padding: Padding) -> Result<Vec<u8>> {
    decrypt(Mode::Ecb, padding, key, None, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY16: [u8; 16] = [0x11; 16];
    const KEY32: [u8; 32] = [0x22; 32];
    const IV: [u8; 16] = [0x33; 16];

    #[test]
    fn rejects_bad_key_length() {
        for len in [0, 15, 17, 24, 31, 33] {
            let key = vec![0u8; len];
            assert_eq!(
                encrypt(Mode::Ecb, Padding::Pkcs7, &key, None, b"data"),
                Err(Error::KeyLength { actual: len })
            );
            assert_eq!(
                decrypt(Mode::Ecb, Padding::Pkcs7, &key, None, &[0u8; 16]),
                Err(Error::KeyLength { actual: len })
            );
        }
    }

    #[test]
    fn accepts_both_key_sizes() {
        assert!(encrypt(Mode::Ecb, Padding::None, &KEY16, None, &[0u8; 16]).is_ok());
        assert!(encrypt(Mode::Ecb, Padding::None, &KEY32, None, &[0u8; 16]).is_ok());
    }

    #[test]
    fn cbc_requires_iv() {
        assert_eq!(
            encrypt(Mode::Cbc, Padding::Pkcs7, &KEY16, None, b"x"),
            Err(Error::Iv { actual: None })
        );
        assert_eq!(
            encrypt(Mode::Cbc, Padding::Pkcs7, &KEY16, Some(&[0u8; 15]), b"x"),
            Err(Error::Iv { actual: Some(15) })
        );
        let long_iv = [0u8; 17];
        let block = [0u8; 16];
        assert_eq!(
            decrypt(Mode::Cbc, Padding::None, &KEY16, Some(&long_iv), &block),
            Err(Error::Iv { actual: Some(17) })
        );
    }

    #[test]
    fn validation_order_is_key_then_iv_then_length() {
        assert_eq!(
            encrypt(Mode::Cbc, Padding::None, &[0u8; 3], None, &[0u8; 5]),
            Err(Error::KeyLength { actual: 3 })
        );
        assert_eq!(
            encrypt(Mode::Cbc, Padding::None, &KEY16, None, &[0u8; 5]),
            Err(Error::Iv { actual: None })
        );
        assert_eq!(
            encrypt(Mode::Cbc, Padding::None, &KEY16, Some(&IV), &[0u8; 5]),
            Err(Error::Length {
                context: "plaintext",
                actual: 5,
                multiple: 16
            })
        );
    }

    #[test]
    fn none_padding_rejects_unaligned_plaintext() {
        assert_eq!(
            encrypt(Mode::Ecb, Padding::None, &KEY16, None, &[0u8; 17]),
            Err(Error::Length {
                context: "plaintext",
                actual: 17,
                multiple: 16
            })
        );
    }

    #[test]
    fn ciphertext_must_be_aligned_for_every_padding() {
        for padding in [Padding::None, Padding::Pkcs7] {
            assert_eq!(
                decrypt(Mode::Cbc, padding, &KEY32, Some(&IV), &[0u8; 20]),
                Err(Error::Length {
                    context: "ciphertext",
                    actual: 20,
                    multiple: 16
                })
            );
        }
    }

    #[test]
    fn ecb_ignores_iv() {
        let iv = [1u8; 3];
        let with_iv = encrypt(Mode::Ecb, Padding::Pkcs7, &KEY16, Some(&iv), b"hello").unwrap();
        let without = encrypt(Mode::Ecb, Padding::Pkcs7, &KEY16, None, b"hello").unwrap();
        assert_eq!(with_iv, without);
    }

    #[test]
    fn round_trips_through_config() {
        let config = CipherConfig::new(Mode::Cbc, Padding::Pkcs7);
        let ct = config.encrypt(&KEY32, Some(&IV), b"attack at dawn").unwrap();
        assert_eq!(ct.len(), 16);
        let pt = config.decrypt(&KEY32, Some(&IV), &ct).unwrap();
        assert_eq!(pt, b"attack at dawn");
    }

    #[test]
    fn default_config_is_cbc_without_padding() {
        assert_eq!(
            CipherConfig::default(),
            CipherConfig::new(Mode::Cbc, Padding::None)
        );
    }

    #[test]
    fn wrong_key_fails_padding_check_or_garbles() {
        let ct = aes_cbc_encrypt(b"secret message", &KEY16, &IV, Padding::Pkcs7).unwrap();
        let mut other = KEY16;
        other[0] ^= 1;
        match aes_cbc_decrypt(&ct, &other, &IV, Padding::Pkcs7) {
            Err(err) => assert_eq!(err, Error::Padding),
            Ok(pt) => assert_ne!(pt, b"secret message"),
        }
    }

    #[test]
    fn ecb_wrappers_match_generic_entry_points() {
        let ct = aes_ecb_encrypt(b"abc", &KEY16, Padding::Pkcs7).unwrap();
        let expected = encrypt(Mode::Ecb, Padding::Pkcs7, &KEY16, None, b"abc").unwrap();
        assert_eq!(ct, expected);
        let pt = aes_ecb_decrypt(&ct, &KEY16, Padding::Pkcs7).unwrap();
        assert_eq!(pt, b"abc");
    }
}
