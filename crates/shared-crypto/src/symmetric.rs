//! # Symmetric Encryption
//!
//! AES-256-CBC with the callback key and its 16-byte prefix as IV. The
//! cipher never pads; callers align input with [`crate::padding::pad`]
//! first and strip it with [`crate::padding::unpad`] afterwards.

use crate::key::AesKey;
use crate::padding::BLOCK_SIZE;
use crate::CryptoError;
use aes::Aes256;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Size of the random payload nonce in bytes.
pub const NONCE_SIZE: usize = 16;

/// Generate a payload nonce from the OS CSPRNG.
pub fn random_nonce() -> [u8; NONCE_SIZE] {
    let mut bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encrypt already padded plaintext.
///
/// # Errors
///
/// Returns `CryptoError::Cipher` if `plaintext` is not a non-empty multiple
/// of [`BLOCK_SIZE`].
pub fn encrypt_blocks(key: &AesKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if plaintext.is_empty() || plaintext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Cipher(format!(
            "plaintext length {} is not a multiple of {}",
            plaintext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &key.iv())
        .map_err(|e| CryptoError::Cipher(e.to_string()))?;

    let mut buf = plaintext.to_vec();
    let len = buf.len();
    cipher
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .map_err(|e| CryptoError::Cipher(e.to_string()))?;

    Ok(buf)
}

/// Decrypt ciphertext without removing padding.
///
/// # Errors
///
/// Returns `CryptoError::Decryption` if the ciphertext is empty or not a
/// multiple of [`BLOCK_SIZE`], and `CryptoError::Cipher` if the cipher itself
/// rejects the input.
pub fn decrypt_blocks(key: &AesKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Decryption(format!(
            "ciphertext length {} is not a multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &key.iv())
        .map_err(|e| CryptoError::Cipher(e.to_string()))?;

    let mut buf = ciphertext.to_vec();
    let plain_len = cipher
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| CryptoError::Cipher(e.to_string()))?
        .len();
    buf.truncate(plain_len);

    Ok(buf)
}
