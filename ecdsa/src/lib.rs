//! ECDSA over secp256k1.
//!
//! - Random or caller-supplied nonces ([`sign`]) and RFC 6979 deterministic
//!   nonces ([`deterministic_sign`])
//! - Optional low-s normalization
//! - DER-encoded signatures and SEC1 public keys
//!
//! ```
//! use ecdsa::{SigningKey, deterministic_sign, verify};
//!
//! let key = SigningKey::random(&mut rand::rng());
//! let digest = [3u8; 32];
//!
//! let sig = deterministic_sign(&digest, &key.to_bytes(), true).expect("sign");
//! let pubkey = key.verifying_key().to_compressed();
//! assert_eq!(verify(&digest, &pubkey, &sig.to_der()), Ok(true));
//! ```

mod der;
mod errors;
mod keys;
mod rfc6979;
mod signature;


pub use errors::EcdsaError;
pub use keys::{SigningKey, VerifyingKey};
pub use rfc6979::NonceGenerator;
pub use signature::{Signature, deterministic_sign, sign, verify};

/// Size of the signed message digest.
pub const MSG_SIZE: usize = 32;

/// Size of a serialized secret key.
pub const SK_SIZE: usize = 32;

/// Upper bound on RFC 6979 candidates tried by [`deterministic_sign`].
pub const MAX_NONCE_ATTEMPTS: usize = 9;
