// Content hashing for captured images
//
// The comparison service stores a SHA-512 hex digest alongside every
// snapshot; the stabilization loop compares against that value, so the
// digest computed here must use the same algorithm.

use sha2::{Digest, Sha512};

/// Computes the hex-encoded SHA-512 digest of an image buffer.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
