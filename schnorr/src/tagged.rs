//! Domain-separated hashing: `SHA256(SHA256(tag) || SHA256(tag) || msg)`.
//!
//! Tag digests are memoized in a process-wide cache. The cache is seeded with
//! the two tags the signature scheme uses, so the hot path only ever takes the
//! read lock; other tags are inserted on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::constants::{CHALLENGE_TAG, NONCE_TAG};

static TAG_DIGESTS: LazyLock<RwLock<HashMap<String, [u8; 32]>>> = LazyLock::new(|| {
    let mut digests = HashMap::new();
    for tag in [NONCE_TAG, CHALLENGE_TAG] {
        digests.insert(tag.to_owned(), sha256(tag.as_bytes()));
    }
    RwLock::new(digests)
});

/// Plain SHA-256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Memoized `SHA256(tag)`.
pub fn tag_digest(tag: &str) -> [u8; 32] {
    if let Some(digest) = TAG_DIGESTS.read().get(tag) {
        return *digest;
    }

    let digest = sha256(tag.as_bytes());
    // Racing first users compute the same value, so the first insert wins.
    *TAG_DIGESTS.write().entry(tag.to_owned()).or_insert(digest)
}

/// Tagged hash over the concatenation of `chunks`.
pub fn tagged_hash(tag: &str, chunks: &[&[u8]]) -> [u8; 32] {
    let prefix = tag_digest(tag);
    let mut hasher = Sha256::new();
    hasher.update(prefix);
    hasher.update(prefix);
    for chunk in chunks {
        hasher.update(chunk);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_matches_definition() {
        let tag = sha256(b"BIPSchnorr");
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&tag);
        preimage.extend_from_slice(&tag);
        preimage.extend_from_slice(b"hello");

        assert_eq!(tagged_hash("BIPSchnorr", &[b"hel", b"lo"]), sha256(&preimage));
    }

    #[test]
    fn test_concurrent_first_use() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| tag_digest("concurrent/first-use")))
            .collect();

        let expected = sha256(b"concurrent/first-use");
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    }
}
