//! PKCS#7 padding and the padding policy applied around the chaining modes.

use core::fmt;
use core::str::FromStr;

use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

use crate::block::{is_block_aligned, BLOCK_SIZE};
use crate::error::{Error, Result};

/// How plaintext is brought to a block boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Padding {
    /// No padding; plaintext must already be block-aligned.
    #[default]
    None,
    /// PKCS#7: append `n` bytes of value `n`, always at least one byte.
    Pkcs7,
}

impl Padding {
    /// Prepares plaintext for encryption.
    ///
    /// With [`Padding::None`] the input is copied unchanged, and it must be a
    /// whole number of blocks.
    pub fn apply(self, plaintext: &[u8]) -> Result<Vec<u8>> {
        match self {
            Padding::None => {
                check_aligned("plaintext", plaintext.len())?;
                Ok(plaintext.to_vec())
            }
            Padding::Pkcs7 => Ok(pkcs7_pad(plaintext)),
        }
    }

    /// Removes padding from decrypted bytes, truncating in place.
    pub fn strip(self, mut decrypted: Vec<u8>) -> Result<Vec<u8>> {
        if self == Padding::Pkcs7 {
            let len = pkcs7_unpad(&decrypted)?.len();
            decrypted.truncate(len);
        }
        Ok(decrypted)
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::None => f.write_str("None"),
            Padding::Pkcs7 => f.write_str("PKCS7"),
        }
    }
}

impl FromStr for Padding {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "nopadding" => Ok(Padding::None),
            "pkcs7" | "pkcs#7" => Ok(Padding::Pkcs7),
            other => Err(format!("unknown padding {other:?}, expected none/pkcs7")),
        }
    }
}

pub(crate) fn check_aligned(context: &'static str, len: usize) -> Result<()> {
    if is_block_aligned(len) {
        Ok(())
    } else {
        Err(Error::Length {
            context,
            actual: len,
            multiple: BLOCK_SIZE,
        })
    }
}

/// Appends PKCS#7 padding. A full block of `0x10` is added to aligned input.
pub fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Validates and strips PKCS#7 padding, returning the unpadded prefix.
///
/// Every byte of the final window (up to one block) is compared whatever the
/// pad value, and the verdict is accumulated in a [`Choice`] with no early exit.
pub fn pkcs7_unpad(data: &[u8]) -> Result<&[u8]> {
    let pad = *data.last().ok_or(Error::Padding)?;
    let window = data.len().min(BLOCK_SIZE);
    let tail = &data[data.len() - window..];

    // 1 <= pad <= window covers both "pad > 16" and "pad > len".
    let mut valid: Choice = !pad.ct_eq(&0) & !pad.ct_gt(&(window as u8));
    for (offset, byte) in tail.iter().rev().enumerate() {
        let in_pad = (offset as u8).ct_lt(&pad);
        valid &= !in_pad | byte.ct_eq(&pad);
    }

    if bool::from(valid) {
        Ok(&data[..data.len() - pad as usize])
    } else {
        Err(Error::Padding)
    }
}
