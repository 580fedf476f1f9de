//! Key types for AES-128 and AES-256.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Supported AES variants, selected by key length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key, 10 rounds.
    Aes128,
    /// 32-byte key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes to its variant.
    pub fn from_key_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aes128),
            32 => Ok(Self::Aes256),
            actual => Err(Error::KeyLength { actual }),
        }
    }

    /// Maps a key size in bits (128 or 256) to its variant.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            128 => Some(Self::Aes128),
            256 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes256 => 32,
        }
    }

    /// Key length in 32-bit words (`Nk`).
    pub(crate) fn key_words(self) -> usize {
        self.key_len() / 4
    }

    /// Number of rounds (`Nr`).
    pub fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes256 => 14,
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes128 => f.write_str("AES-128"),
            Self::Aes256 => f.write_str("AES-256"),
        }
    }
}

impl FromStr for KeySize {
    type Err = String;

    /// Accepts a bit count, `128` or `256`, optionally prefixed with `aes-`.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let bits = lower.strip_prefix("aes-").unwrap_or(&lower);
        bits.parse::<u16>()
            .ok()
            .and_then(Self::from_bits)
            .ok_or_else(|| format!("unknown key size {s:?}, expected 128 or 256"))
    }
}

/// Borrowed AES key whose length has been validated.
#[derive(Clone, Copy)]
pub struct Key<'a> {
    bytes: &'a [u8],
    size: KeySize,
}

impl<'a> Key<'a> {
    /// Wraps `bytes`, rejecting anything other than 16 or 32 bytes.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let size = KeySize::from_key_len(bytes.len())?;
        Ok(Self { bytes, size })
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Variant implied by the key length.
    pub fn size(&self) -> KeySize {
        self.size
    }
}

impl<'a> TryFrom<&'a [u8]> for Key<'a> {
    type Error = Error;

    fn try_from(bytes: &'a [u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

impl fmt::Debug for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
