//! PKCS#7-style padding over 32-byte blocks.
//!
//! The callback protocol pads to 32 bytes even though AES works on 16-byte
//! blocks, so padding is done here by hand and the cipher runs unpadded.

/// Padding block size in bytes.
pub const BLOCK_SIZE: usize = 32;

/// Pad `buf` to the next multiple of [`BLOCK_SIZE`].
///
/// Always appends between 1 and 32 bytes, each equal to the pad length.
pub fn pad(buf: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - (buf.len() % BLOCK_SIZE);
    let mut out = Vec::with_capacity(buf.len() + pad_len);
    out.extend_from_slice(buf);
    // pad_len <= 32, fits in a byte
    out.resize(buf.len() + pad_len, pad_len as u8);
    out
}

/// Strip padding added by [`pad`].
///
/// A trailing byte outside `1..=32` (or longer than the buffer) leaves the
/// input untouched instead of failing.
pub fn unpad(buf: &[u8]) -> &[u8] {
    let Some(&last) = buf.last() else {
        return buf;
    };
    let pad_len = last as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > buf.len() {
        return buf;
    }
    &buf[..buf.len() - pad_len]
}
