//! ECDSA key types with SEC1 point encodings.

use curve::{Affine, COMPRESSED_SIZE, Group, ScalarField, UNCOMPRESSED_SIZE, random_nonzero_scalar};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::EcdsaError;
use crate::rfc6979::NonceGenerator;
use crate::signature::Signature;
use crate::{MAX_NONCE_ATTEMPTS, MSG_SIZE, SK_SIZE};

/// A secret scalar in `[1, n-1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    scalar: ScalarField,
}

/// A public key: the point `G * d`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    point: Affine,
}

impl SigningKey {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            scalar: random_nonzero_scalar(rng),
        }
    }

    /// Parses a 32-byte big-endian secret. Wrong lengths and values outside
    /// `[1, n-1]` are both [`EcdsaError::InvalidPrivateKey`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcdsaError> {
        let bytes: &[u8; SK_SIZE] = bytes.try_into().map_err(|_| EcdsaError::InvalidPrivateKey)?;
        match ScalarField::from_bytes(bytes) {
            Some(scalar) if !scalar.is_zero() => Ok(Self { scalar }),
            _ => Err(EcdsaError::InvalidPrivateKey),
        }
    }

    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        self.scalar.to_bytes()
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            point: <Affine as Group>::mul_generator(&self.scalar),
        }
    }

    /// `r = (k * G).x mod n`, `s = k^-1 (h + r * d) mod n`.
    ///
    /// Returns `None` when `r` or `s` is zero.
    pub fn sign_with_nonce(&self, digest: &[u8; MSG_SIZE], nonce: &ScalarField, canonical: bool) -> Option<Signature> {
        let point = <Affine as Group>::mul_generator(nonce);
        if point.is_infinity() {
            return None;
        }

        let r = ScalarField::from_bytes_reduced(&point.to_x_only());
        if r.is_zero() {
            return None;
        }

        let h = ScalarField::from_bytes_reduced(digest);
        let s = nonce.invert().ok()? * (h + r * self.scalar);
        if s.is_zero() {
            return None;
        }

        let sig = Signature { r, s };
        Some(if canonical { sig.normalize_s() } else { sig })
    }

    /// Signs with RFC 6979 nonces, continuing the generator past degenerate
    /// candidates.
    pub fn sign_deterministic(&self, digest: &[u8; MSG_SIZE], canonical: bool) -> Result<Signature, EcdsaError> {
        let mut generator = NonceGenerator::new(&self.scalar, digest);
        for _ in 0..MAX_NONCE_ATTEMPTS {
            let nonce = generator.next_nonce();
            if let Some(sig) = self.sign_with_nonce(digest, &nonce, canonical) {
                return Ok(sig);
            }
        }
        Err(EcdsaError::NonceExhausted(MAX_NONCE_ATTEMPTS))
    }
}

impl VerifyingKey {
    pub(crate) fn check_length(bytes: &[u8]) -> Result<(), EcdsaError> {
        match bytes.len() {
            COMPRESSED_SIZE | UNCOMPRESSED_SIZE => Ok(()),
            _ => Err(EcdsaError::InvalidPublicKeyLength),
        }
    }

    /// Decodes a SEC1 compressed (33-byte) or uncompressed (65-byte) point.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self, EcdsaError> {
        Self::check_length(bytes)?;
        let point = Affine::from_sec1(bytes).ok_or(EcdsaError::InvalidPoint)?;
        Ok(Self { point })
    }

    pub fn to_compressed(&self) -> [u8; COMPRESSED_SIZE] {
        self.point.to_compressed()
    }

    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_SIZE] {
        self.point.to_uncompressed()
    }

    pub fn point(&self) -> &Affine {
        &self.point
    }

    /// `u1 = h / s`, `u2 = r / s`; valid iff `(u1 * G + u2 * P).x mod n == r`.
    pub fn verify(&self, digest: &[u8; MSG_SIZE], sig: &Signature) -> bool {
        let Ok(s_inv) = sig.s.invert() else {
            return false;
        };
        let h = ScalarField::from_bytes_reduced(digest);
        let u1 = h * s_inv;
        let u2 = sig.r * s_inv;

        let candidate = <Affine as Group>::mul_generator(&u1) + self.point * u2;
        if candidate.is_infinity() {
            return false;
        }
        ScalarField::from_bytes_reduced(&candidate.to_x_only()) == sig.r
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}
