//! Checksum calculation for artifact integrity.

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 checksum of an artifact payload.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hex::encode(hasher.finalize())
}
