//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors reported by the cipher engine and its boundary helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is neither 16 nor 32 bytes long.
    #[error("key must be 16 or 32 bytes (AES-128/256), got {actual}")]
    KeyLength {
        /// Length of the rejected key.
        actual: usize,
    },

    /// CBC was requested without a 16-byte IV.
    #[error("IV must be 16 bytes for CBC, {}", describe_iv(.actual))]
    Iv {
        /// Length of the rejected IV, or `None` when it was absent.
        actual: Option<usize>,
    },

    /// An input buffer is not a whole number of units.
    #[error("{context} length must be a multiple of {multiple}, got {actual}")]
    Length {
        /// What was being measured.
        context: &'static str,
        /// Length that was supplied.
        actual: usize,
        /// Required granularity.
        multiple: usize,
    },

    /// A hex string contained a character outside `[0-9a-fA-F]`.
    #[error("invalid hex character {character:?} at position {index}")]
    InvalidHex {
        /// Offending character.
        character: char,
        /// Byte offset in the cleaned string.
        index: usize,
    },

    /// PKCS#7 padding failed its integrity check.
    #[error("bad padding")]
    Padding,
}

fn describe_iv(actual: &Option<usize>) -> String {
    match actual {
        Some(len) => format!("got {len}"),
        None => "none supplied".to_string(),
    }
}

/// Result alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::KeyLength { actual: 15 }.to_string(),
            "key must be 16 or 32 bytes (AES-128/256), got 15"
        );
        assert_eq!(
            Error::Iv { actual: None }.to_string(),
            "IV must be 16 bytes for CBC, none supplied"
        );
        assert_eq!(
            Error::Iv { actual: Some(15) }.to_string(),
            "IV must be 16 bytes for CBC, got 15"
        );
        assert_eq!(
            Error::Length {
                context: "plaintext",
                actual: 17,
                multiple: 16
            }
            .to_string(),
            "plaintext length must be a multiple of 16, got 17"
        );
        assert_eq!(Error::Padding.to_string(), "bad padding");
    }
}
