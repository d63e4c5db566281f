use sha2::{Digest, Sha256};

/// Derive a display/dedup id from a provider's native string id.
///
/// Stable across runs and platforms. Not unique across providers and never a storage key.
pub fn stable_id(native_id: &str) -> i64 {
    let digest = Sha256::digest(native_id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    // Keep it positive so it reads like the other id shapes
    (u64::from_be_bytes(bytes) & i64::MAX as u64) as i64
}
