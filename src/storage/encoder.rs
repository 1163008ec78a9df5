//! Short key derivation
//!
//! A key is the 32-bit FNV-1a hash of the value's UTF-8 bytes, laid out
//! little-endian and rendered with the URL-safe base64 alphabet (padded).
//! The hash is seedless, so a value maps to the same key in every process.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Length of every key produced by [`encode`]: 4 bytes → 8 padded base64 chars.
pub const KEY_LEN: usize = 8;

/// 32-bit FNV-1a.
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Derive the short key for `value`. Total over all strings, including "".
pub fn encode(value: &str) -> String {
    URL_SAFE.encode(fnv1a_32(value.as_bytes()).to_le_bytes())
}
