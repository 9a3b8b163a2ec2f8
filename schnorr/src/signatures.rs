//! Signature type, challenge hashing and the byte-level sign/verify entry points.

use curve::ScalarField;
use serde::{Deserialize, Serialize};

use crate::constants::{CHALLENGE_TAG, MSG_SIZE, PK_SIZE, SIG_SIZE};
use crate::errors::SchnorrError;
use crate::keys::{SigningKey, VerifyingKey};
use crate::tagged::tagged_hash;

/// A Schnorr signature `(r, s)`.
///
/// - `r` is the x-coordinate of the nonce point R
/// - `s` is the response scalar `k + e * d mod n`
///
/// Both halves are kept as raw big-endian bytes. A parsed signature may carry
/// `r >= p` or `s >= n`; verification rejects those.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != SIG_SIZE {
            return Err(SchnorrError::InvalidSignatureLength);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Self { r, s })
    }

    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }
}

/// Fiat-Shamir challenge `e = H_challenge(r || P.x || msg) mod n`.
pub(crate) fn hash_challenge(r: &[u8; 32], pk: &[u8; PK_SIZE], msg: &[u8; MSG_SIZE]) -> ScalarField {
    ScalarField::from_bytes_reduced(&tagged_hash(CHALLENGE_TAG, &[r, pk, msg]))
}

/// Signs a 32-byte digest with a 32-byte secret key, returning the 64-byte
/// signature.
pub fn sign(msg: &[u8], seckey: &[u8]) -> Result<[u8; SIG_SIZE], SchnorrError> {
    if msg.len() != MSG_SIZE {
        return Err(SchnorrError::InvalidMessageLength);
    }
    let key = SigningKey::from_bytes(seckey)?;
    Ok(key.sign(msg)?.to_bytes())
}

/// Verifies a 64-byte signature over a 32-byte digest against a 32-byte
/// x-only public key.
///
/// Lengths are checked in the order message, public key, signature. A public
/// key that is not the x-coordinate of any curve point yields `Ok(false)`.
pub fn verify(msg: &[u8], pubkey: &[u8], sig: &[u8]) -> Result<bool, SchnorrError> {
    if msg.len() != MSG_SIZE {
        return Err(SchnorrError::InvalidMessageLength);
    }
    if pubkey.len() != PK_SIZE {
        return Err(SchnorrError::InvalidPublicKeyLength);
    }
    let sig = Signature::from_bytes(sig)?;

    match VerifyingKey::from_bytes(pubkey) {
        Ok(key) => key.verify(msg, &sig),
        Err(SchnorrError::InvalidPoint) => Ok(false),
        Err(err) => Err(err),
    }
}

/// The x-only public key for a 32-byte secret key.
pub fn public_key(seckey: &[u8]) -> Result<[u8; PK_SIZE], SchnorrError> {
    Ok(SigningKey::from_bytes(seckey)?.verifying_key().to_bytes())
}
