//! # Callback Key Material
//!
//! The platform hands out a 43-character EncodingAESKey: standard base64 of a
//! 32-byte AES-256 key with the single trailing `=` stripped. The first 16
//! key bytes double as the CBC initialization vector.

use crate::CryptoError;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// CBC initialization vector size in bytes.
pub const IV_SIZE: usize = 16;

/// Length of the encoded key as configured.
pub const ENCODED_KEY_LEN: usize = 43;

// Platform keys are random base64 text, so the last symbol's two spare bits
// are frequently non-zero. The canonical engine would reject those keys.
const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decoded 256-bit callback key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesKey([u8; KEY_SIZE]);

impl AesKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Initialization vector: the first 16 bytes of the key.
    pub fn iv(&self) -> [u8; IV_SIZE] {
        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&self.0[..IV_SIZE]);
        iv
    }
}

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AesKey(<redacted>)")
    }
}

/// Decode a 43-character EncodingAESKey into a 32-byte key.
///
/// # Errors
///
/// Returns `CryptoError::KeyFormat` when the input is not 43 characters, is
/// not valid base64 once `=` is appended, or does not decode to 32 bytes.
pub fn decode_key(encoding_key: &str) -> Result<AesKey, CryptoError> {
    if encoding_key.len() != ENCODED_KEY_LEN {
        return Err(CryptoError::KeyFormat(format!(
            "expected {} characters, got {}",
            ENCODED_KEY_LEN,
            encoding_key.len()
        )));
    }

    let mut padded = String::with_capacity(ENCODED_KEY_LEN + 1);
    padded.push_str(encoding_key);
    padded.push('=');

    let mut decoded = KEY_ENGINE
        .decode(padded.as_bytes())
        .map_err(|e| CryptoError::KeyFormat(e.to_string()))?;

    if decoded.len() != KEY_SIZE {
        let actual = decoded.len();
        decoded.zeroize();
        return Err(CryptoError::KeyFormat(format!(
            "expected {} key bytes, got {}",
            KEY_SIZE, actual
        )));
    }

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&decoded);
    decoded.zeroize();
    Ok(AesKey(bytes))
}
