//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};
use sha1::{Digest, Sha1};

/// Generate a random 32-byte secret (token signing key)
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Compute SHA-1 hash as a lowercase hex string
///
/// Used for legacy API signatures (the image gateway signs request
/// parameters with SHA-1), never for password or token material.
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
