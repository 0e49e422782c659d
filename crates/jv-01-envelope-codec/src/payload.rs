//! # Structured Plaintext Payload
//!
//! Byte layout inside the cipher:
//!
//! | Offset | Length | Content |
//! |--------|--------|---------|
//! | 0 | 16 | random nonce (discarded on read) |
//! | 16 | 4 | message length `L`, big-endian |
//! | 20 | `L` | UTF-8 message |
//! | 20 + `L` | rest | UTF-8 sender identity |
//!
//! The whole buffer is padded to 32 bytes before encryption.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared_crypto::{
    decrypt_blocks, encrypt_blocks, pad, random_nonce, unpad, AesKey, CryptoError, NONCE_SIZE,
};

const LENGTH_SIZE: usize = 4;
const HEADER_SIZE: usize = NONCE_SIZE + LENGTH_SIZE;

/// A decrypted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainPayload {
    /// The message (an XML document for message callbacks, an opaque token
    /// for URL verification).
    pub message: String,
    /// The account identity embedded by the sender.
    pub sender_identity: String,
}

/// Encrypt `message` for `identity`, returning base64 ciphertext.
///
/// A fresh CSPRNG nonce is drawn on every call, so the output is never
/// repeated for the same input.
///
/// # Errors
///
/// Returns `CryptoError::Cipher` if the message is longer than `u32::MAX`
/// bytes or the cipher rejects the padded buffer.
pub fn encrypt_message(key: &AesKey, message: &str, identity: &str) -> Result<String, CryptoError> {
    encrypt_message_with_nonce(key, &random_nonce(), message, identity)
}

pub(crate) fn encrypt_message_with_nonce(
    key: &AesKey,
    nonce: &[u8; NONCE_SIZE],
    message: &str,
    identity: &str,
) -> Result<String, CryptoError> {
    let message = message.as_bytes();
    let len = u32::try_from(message.len()).map_err(|_| {
        CryptoError::Cipher(format!("message of {} bytes exceeds u32 length", message.len()))
    })?;

    let mut plain = Vec::with_capacity(HEADER_SIZE + message.len() + identity.len());
    plain.extend_from_slice(nonce);
    plain.extend_from_slice(&len.to_be_bytes());
    plain.extend_from_slice(message);
    plain.extend_from_slice(identity.as_bytes());

    let ciphertext = encrypt_blocks(key, &pad(&plain))?;
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypt base64 ciphertext into its message and sender identity.
///
/// # Errors
///
/// - `CryptoError::Decryption` for bad base64, a length that is not a
///   multiple of 32, a truncated header, a length prefix that overruns the
///   buffer, or non-UTF-8 text.
/// - `CryptoError::Cipher` if the block cipher rejects the input.
pub fn decrypt_message(key: &AesKey, ciphertext: &str) -> Result<PlainPayload, CryptoError> {
    let raw = STANDARD
        .decode(ciphertext.as_bytes())
        .map_err(|e| CryptoError::Decryption(format!("invalid base64: {}", e)))?;

    let decrypted = decrypt_blocks(key, &raw)?;
    let plain = unpad(&decrypted);

    if plain.len() < HEADER_SIZE {
        return Err(CryptoError::Decryption(format!(
            "payload of {} bytes is shorter than the {}-byte header",
            plain.len(),
            HEADER_SIZE
        )));
    }

    let mut len_bytes = [0u8; LENGTH_SIZE];
    len_bytes.copy_from_slice(&plain[NONCE_SIZE..HEADER_SIZE]);
    let msg_len = u32::from_be_bytes(len_bytes) as usize;

    let body = &plain[HEADER_SIZE..];
    if msg_len > body.len() {
        return Err(CryptoError::Decryption(format!(
            "message length {} exceeds remaining {} bytes",
            msg_len,
            body.len()
        )));
    }
    let (message, identity) = body.split_at(msg_len);

    let message = std::str::from_utf8(message)
        .map_err(|e| CryptoError::Decryption(format!("message is not UTF-8: {}", e)))?;
    let sender_identity = std::str::from_utf8(identity)
        .map_err(|e| CryptoError::Decryption(format!("identity is not UTF-8: {}", e)))?;

    Ok(PlainPayload {
        message: message.to_owned(),
        sender_identity: sender_identity.to_owned(),
    })
}
