//! RFC 6979 deterministic nonces (HMAC-SHA256, qlen = hlen = 256).

use curve::ScalarField;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The HMAC-DRBG of RFC 6979 section 3.2, seeded from a secret key and a
/// message digest.
///
/// Each call to [`NonceGenerator::next_nonce`] yields the next candidate in
/// `[1, n-1]`. Calling it again after a candidate was rejected continues the
/// generator as in step 3.2.h.3.
pub struct NonceGenerator {
    k: [u8; 32],
    v: [u8; 32],
    started: bool,
}

impl NonceGenerator {
    pub fn new(secret: &ScalarField, digest: &[u8; 32]) -> Self {
        let x = secret.to_bytes();
        // bits2octets(h1): reduce the digest modulo n.
        let h = ScalarField::from_bytes_reduced(digest).to_bytes();

        let mut k = [0u8; 32];
        let mut v = [1u8; 32];

        k = hmac(&k, &[&v, &[0x00], &x, &h]);
        v = hmac(&k, &[&v]);
        k = hmac(&k, &[&v, &[0x01], &x, &h]);
        v = hmac(&k, &[&v]);

        Self { k, v, started: false }
    }

    pub fn next_nonce(&mut self) -> ScalarField {
        loop {
            if self.started {
                self.k = hmac(&self.k, &[&self.v, &[0x00]]);
                self.v = hmac(&self.k, &[&self.v]);
            }
            self.started = true;

            self.v = hmac(&self.k, &[&self.v]);
            if let Some(candidate) = ScalarField::from_bytes(&self.v) {
                if !candidate.is_zero() {
                    return candidate;
                }
            }
        }
    }
}

fn hmac(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}
