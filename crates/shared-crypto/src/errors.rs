//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// None of these are retryable: each one describes a single malformed key or
/// ciphertext, and retrying with the same input yields the same result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The configured EncodingAESKey is not a 43-character base64 string
    /// encoding exactly 32 bytes.
    #[error("Invalid key format: {0}")]
    KeyFormat(String),

    /// The block cipher rejected its input.
    #[error("Cipher failure: {0}")]
    Cipher(String),

    /// The ciphertext or the decrypted payload is structurally invalid.
    #[error("Decryption failed: {0}")]
    Decryption(String),
}
