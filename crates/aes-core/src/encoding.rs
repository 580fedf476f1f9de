//! Hex helpers for front-ends that exchange byte buffers as text.

use hex::FromHexError;

use crate::error::{Error, Result};

/// Normalises user-supplied hex: trims, drops one `0x` prefix, removes all
/// whitespace and lowercases.
pub fn clean_hex(input: &str) -> String {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    body.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Decodes hex after [`clean_hex`].
///
/// An odd digit count is a [`Error::Length`]; any other character is
/// [`Error::InvalidHex`], reported with its byte offset in the cleaned string.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned = clean_hex(input);
    hex::decode(&cleaned).map_err(|err| match err {
        // `c` is only the offending byte; recover the full character.
        FromHexError::InvalidHexCharacter { c, index } => Error::InvalidHex {
            character: cleaned
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(c),
            index,
        },
        FromHexError::OddLength | FromHexError::InvalidStringLength => Error::Length {
            context: "hex input",
            actual: cleaned.len(),
            multiple: 2,
        },
    })
}

/// Lowercase hex rendering.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
