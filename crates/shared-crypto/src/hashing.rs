//! # SHA-1 Hashing
//!
//! The callback signature is a bare SHA-1 digest. SHA-1 is only used here
//! because the platform mandates it; nothing else in the workspace should.

use sha1::{Digest, Sha1};

/// SHA-1 hash output (160-bit).
pub type Hash = [u8; 20];

/// Hash data with SHA-1 (one-shot).
pub fn sha1_hash(data: &[u8]) -> Hash {
    Sha1::digest(data).into()
}

/// Hash multiple inputs as if they were concatenated.
pub fn sha1_hash_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha1::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}

/// Lowercase hex SHA-1 of `data`.
pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(sha1_hash(data))
}
