//! Constants used in the Schnorr signature scheme implementation.

/// Size of a serialized public verifying key in bytes.
///
/// A verifying key is the x-coordinate of a secp256k1 point; the y-coordinate
/// is implied by the quadratic-residue convention.
pub const PK_SIZE: usize = 32;

/// Size of a serialized secret signing key in bytes.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - The x-coordinate of the nonce point R (32 bytes)
/// - A scalar s (32 bytes)
/// Total: 64 bytes
pub const SIG_SIZE: usize = 64;

/// Size of the message digest that gets signed.
pub const MSG_SIZE: usize = 32;

/// Tag for deterministic nonce derivation.
pub const NONCE_TAG: &str = "BIPSchnorrDerive";

/// Tag for the Fiat-Shamir challenge.
pub const CHALLENGE_TAG: &str = "BIPSchnorr";
