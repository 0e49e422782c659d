//! # Callback Signatures
//!
//! `msg_signature = sha1(sort([token, timestamp, nonce, payload]).join(""))`
//!
//! The same function signs inbound verification and outbound replies; only
//! the four strings differ. Sorting is the normalization step, so argument
//! order does not matter.

use crate::hashing::sha1_hash_many;
use subtle::ConstantTimeEq;

/// Compute the lowercase hex signature over four strings.
pub fn signature(token: &str, timestamp: &str, nonce: &str, payload: &str) -> String {
    let mut parts = [token, timestamp, nonce, payload];
    parts.sort_unstable();

    let digest = sha1_hash_many(&parts.map(str::as_bytes));
    hex::encode(digest)
}

/// Check a received signature against the recomputed one.
///
/// Comparison is constant-time over the hex text.
pub fn verify_signature(
    expected: &str,
    token: &str,
    timestamp: &str,
    nonce: &str,
    payload: &str,
) -> bool {
    let computed = signature(token, timestamp, nonce, payload);
    computed.as_bytes().ct_eq(expected.as_bytes()).into()
}
