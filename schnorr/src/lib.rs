//! Schnorr signatures over secp256k1 with x-only public keys.
//!
//! This library implements the quadratic-residue variant of BIP-Schnorr:
//! - 32-byte x-only public keys whose implied y is a quadratic residue mod p
//! - 64-byte signatures `R.x || s`
//! - Deterministic nonces from a tagged hash of the secret key and message
//! - Tagged SHA-256 (`BIPSchnorrDerive`, `BIPSchnorr`) for domain separation
//!
//! Messages are always 32-byte digests; hashing arbitrary data is the
//! caller's job.
//!
//! # Example
//!
//! ```
//! use schnorr::{SigningKey, VerifyingKey};
//!
//! let signing_key = SigningKey::random(&mut rand::rng());
//! let verifying_key = signing_key.verifying_key();
//!
//! let digest = [7u8; 32];
//! let signature = signing_key.sign(&digest).expect("signing failed");
//!
//! let is_valid = verifying_key.verify(&digest, &signature).expect("verification failed");
//! assert!(is_valid);
//!
//! let decoded = VerifyingKey::from_bytes(&verifying_key.to_bytes()).expect("x-only key");
//! assert_eq!(decoded, verifying_key);
//! ```
//!
//! # Security Considerations
//!
//! - Nonces are deterministic; signing the same digest twice yields the same signature
//! - Scalar multiplication is not constant time
//! - Protect the signing key from unauthorized access

mod constants;
mod errors;
mod keys;
mod signatures;
mod tagged;


pub use constants::{CHALLENGE_TAG, MSG_SIZE, NONCE_TAG, PK_SIZE, SIG_SIZE, SK_SIZE};
pub use errors::SchnorrError;
pub use keys::{SigningKey, VerifyingKey};
pub use signatures::{Signature, public_key, sign, verify};
pub use tagged::{sha256, tag_digest, tagged_hash};
