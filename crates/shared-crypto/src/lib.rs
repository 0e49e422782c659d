//! # Shared Crypto - Callback Cryptographic Primitives
//!
//! The bottom layer of the callback security protocol. Nothing in here knows
//! about HTTP, XML, or the payload layout; it only turns bytes into bytes.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `key` | base64 (43 chars + `=`) | Decode the shared EncodingAESKey |
//! | `padding` | PKCS#7, 32-byte blocks | Explicit block alignment |
//! | `hashing` | SHA-1 | Digest behind the request signature |
//! | `signatures` | sorted SHA-1 | Sign / verify callback parameters |
//! | `symmetric` | AES-256-CBC, no padding | Encrypt / decrypt payload blocks |
//!
//! ## Security Properties
//!
//! - Key bytes are zeroized on drop and never printed by `Debug`
//! - Signature comparison is constant-time
//! - Random nonces come from the operating system CSPRNG

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod key;
pub mod padding;
pub mod signatures;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha1_hash, sha1_hex};
pub use key::{decode_key, AesKey, ENCODED_KEY_LEN, KEY_SIZE};
pub use padding::{pad, unpad, BLOCK_SIZE};
pub use signatures::{signature, verify_signature};
pub use symmetric::{decrypt_blocks, encrypt_blocks, random_nonce, NONCE_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
