//! ECDSA signature type and the byte-level sign/verify entry points.

use curve::{ScalarField, random_nonzero_scalar};
use serde::{Deserialize, Serialize};

use crate::der;
use crate::errors::EcdsaError;
use crate::keys::{SigningKey, VerifyingKey};
use crate::MSG_SIZE;

/// An ECDSA signature `(r, s)` with both scalars in `[1, n-1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub r: ScalarField,
    pub s: ScalarField,
}

impl Signature {
    /// True when `s <= n / 2`.
    pub fn is_low_s(&self) -> bool {
        !self.s.is_high()
    }

    /// Replaces a high `s` with `n - s`. Both forms verify.
    pub fn normalize_s(&self) -> Self {
        if self.is_low_s() {
            *self
        } else {
            Self {
                r: self.r,
                s: -self.s,
            }
        }
    }

    pub fn to_der(&self) -> Vec<u8> {
        der::encode(&self.r.to_bytes(), &self.s.to_bytes())
    }

    /// Parses a DER signature.
    ///
    /// Structural violations are errors. A well-formed encoding whose `r` or
    /// `s` lies outside `[1, n-1]` yields `Ok(None)`.
    pub fn from_der(bytes: &[u8]) -> Result<Option<Self>, EcdsaError> {
        let (r, s) = der::decode(bytes)?;
        let (Some(r), Some(s)) = (ScalarField::from_bytes(&r), ScalarField::from_bytes(&s)) else {
            return Ok(None);
        };
        if r.is_zero() || s.is_zero() {
            return Ok(None);
        }
        Ok(Some(Self { r, s }))
    }
}

/// Signs a 32-byte digest.
///
/// Uses `nonce` when given and nonzero, otherwise a fresh random nonce.
/// Returns `Ok(None)` when the nonce produces `r == 0` or `s == 0`; the
/// caller retries with another nonce. With `canonical`, `s` is normalized to
/// the lower half of the scalar range.
pub fn sign(
    msg: &[u8],
    privkey: &[u8],
    nonce: Option<ScalarField>,
    canonical: bool,
) -> Result<Option<Signature>, EcdsaError> {
    let digest: &[u8; MSG_SIZE] = msg.try_into().map_err(|_| EcdsaError::InvalidMessageLength)?;
    let key = SigningKey::from_bytes(privkey)?;

    let nonce = match nonce {
        Some(k) if !k.is_zero() => k,
        _ => random_nonzero_scalar(&mut rand::rng()),
    };
    Ok(key.sign_with_nonce(digest, &nonce, canonical))
}

/// Signs a 32-byte digest with RFC 6979 nonces.
///
/// A degenerate signature continues the nonce generator, up to
/// [`crate::MAX_NONCE_ATTEMPTS`] candidates.
pub fn deterministic_sign(msg: &[u8], privkey: &[u8], canonical: bool) -> Result<Signature, EcdsaError> {
    let digest: &[u8; MSG_SIZE] = msg.try_into().map_err(|_| EcdsaError::InvalidMessageLength)?;
    let key = SigningKey::from_bytes(privkey)?;
    key.sign_deterministic(digest, canonical)
}

/// Verifies a DER signature over a 32-byte digest against a SEC1 public key.
///
/// Checks run in the order message length, public key length, DER structure.
/// Out-of-range scalars and keys that do not decode to a curve point are
/// `Ok(false)`.
pub fn verify(msg: &[u8], pubkey: &[u8], sig: &[u8]) -> Result<bool, EcdsaError> {
    let digest: &[u8; MSG_SIZE] = msg.try_into().map_err(|_| EcdsaError::InvalidMessageLength)?;
    VerifyingKey::check_length(pubkey)?;
    let Some(sig) = Signature::from_der(sig)? else {
        return Ok(false);
    };

    match VerifyingKey::from_sec1(pubkey) {
        Ok(key) => Ok(key.verify(digest, &sig)),
        Err(EcdsaError::InvalidPoint) => Ok(false),
        Err(err) => Err(err),
    }
}
