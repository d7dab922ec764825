//! Short key derivation and validation.
//!
//! Keys are [`SHORT_KEY_LENGTH`] characters over the 62-character
//! alphanumeric alphabet. Without a custom key, the first candidate is derived
//! from a SHA-256 digest of the original URL, so shortening the same URL twice
//! yields the same key. After a collision, candidates are derived from the URL
//! concatenated with a random salt.

use crate::error::AppError;
use sha2::{Digest, Sha256};

/// Key alphabet: digits, then uppercase, then lowercase letters.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of every short key.
pub const SHORT_KEY_LENGTH: usize = 6;

/// Number of random bytes in a retry salt (hex encoded).
const SALT_BYTES: usize = 8;

/// Returns true if `key` has the fixed length and only alphabet characters.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == SHORT_KEY_LENGTH && key.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Validates a caller-supplied custom key.
///
/// # Errors
///
/// Returns [`AppError::InvalidCustomKey`] if the key has the wrong length or
/// contains a character outside the alphabet.
pub fn validate_custom_key(key: &str) -> Result<(), AppError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(AppError::InvalidCustomKey)
    }
}

/// Produces the first candidate key for a shorten request.
///
/// A custom key is validated and returned as is; otherwise the key is derived
/// deterministically from `original_url`.
///
/// # Errors
///
/// Returns [`AppError::InvalidCustomKey`] for a malformed custom key.
pub fn derive_key(original_url: &str, custom_key: Option<&str>) -> Result<String, AppError> {
    match custom_key {
        Some(key) => {
            validate_custom_key(key)?;
            Ok(key.to_string())
        }
        None => Ok(encode_digest(&Sha256::digest(original_url.as_bytes()))),
    }
}

/// Derives a candidate key from `original_url` followed by `salt`.
pub fn derive_salted_key(original_url: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(original_url.as_bytes());
    hasher.update(salt.as_bytes());
    encode_digest(&hasher.finalize())
}

/// Generates a fresh random salt for collision retries.
pub fn random_salt() -> String {
    let bytes: [u8; SALT_BYTES] = rand::random();
    hex::encode(bytes)
}

/// Maps the leading 64 bits of a digest into base-62, keeping the low-order
/// [`SHORT_KEY_LENGTH`] digits.
fn encode_digest(digest: &[u8]) -> String {
    let mut value = digest
        .iter()
        .take(8)
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

    let mut key = [BASE62_ALPHABET[0]; SHORT_KEY_LENGTH];
    for slot in key.iter_mut().rev() {
        *slot = BASE62_ALPHABET[(value % 62) as usize];
        value /= 62;
    }

    key.iter().map(|&b| char::from(b)).collect()
}
