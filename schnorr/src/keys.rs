//! Signing and verifying keys for the Schnorr signature scheme.

use curve::{Affine, Group, ScalarField, random_nonzero_scalar};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MSG_SIZE, NONCE_TAG, PK_SIZE, SK_SIZE};
use crate::errors::SchnorrError;
use crate::signatures::{Signature, hash_challenge};
use crate::tagged::tagged_hash;

/// A secret signing key for creating Schnorr signatures.
///
/// The signing key is a scalar in `[1, n-1]`. Two secret keys, `d` and
/// `n - d`, share the same x-only verifying key; signing normalizes to the
/// one whose public point has a quadratic-residue y.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
///
/// let signing_key = SigningKey::random(&mut rand::rng());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    scalar: ScalarField,
}

/// A public verifying key for verifying Schnorr signatures.
///
/// The verifying key is always the curve point with the quadratic-residue
/// y-coordinate, so it round-trips through its 32-byte x-only encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    point: Affine,
}

impl SigningKey {
    /// Generates a random signing key using the provided random number generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            scalar: random_nonzero_scalar(rng),
        }
    }

    /// Parses a 32-byte big-endian secret key in `[1, n-1]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let bytes: &[u8; SK_SIZE] = bytes
            .try_into()
            .map_err(|_| SchnorrError::InvalidPrivateKeyLength)?;
        match ScalarField::from_bytes(bytes) {
            Some(scalar) if !scalar.is_zero() => Ok(Self { scalar }),
            _ => Err(SchnorrError::InvalidPrivateKey),
        }
    }

    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        self.scalar.to_bytes()
    }

    /// Derives the public verifying key from this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = <Affine as Group>::mul_generator(&self.scalar);
        VerifyingKey {
            point: with_residue_y(point),
        }
    }

    /// Signs a 32-byte message digest.
    ///
    /// Signing is deterministic:
    /// 1. Negate the secret if `G * d` has a non-residue y
    /// 2. Derive `k0 = H_derive(d || msg) mod n`, failing if it is zero
    /// 3. Compute `R = G * k0` and negate `k0` if R has a non-residue y
    /// 4. Compute `e = H_challenge(R.x || P.x || msg) mod n`
    /// 5. Return `R.x || (k + e * d) mod n`
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, SchnorrError> {
        let msg: &[u8; MSG_SIZE] = msg
            .try_into()
            .map_err(|_| SchnorrError::InvalidMessageLength)?;

        let public = <Affine as Group>::mul_generator(&self.scalar);
        let secret = if public.has_quadratic_residue_y() {
            self.scalar
        } else {
            -self.scalar
        };

        let secret_bytes = secret.to_bytes();
        let nonce = ScalarField::from_bytes_reduced(&tagged_hash(NONCE_TAG, &[&secret_bytes, msg]));
        if nonce.is_zero() {
            return Err(SchnorrError::NonceIsZero);
        }

        let r = <Affine as Group>::mul_generator(&nonce);
        let nonce = if r.has_quadratic_residue_y() { nonce } else { -nonce };

        let r_bytes = r.to_x_only();
        let e = hash_challenge(&r_bytes, &public.to_x_only(), msg);
        let s = nonce + e * secret;

        Ok(Signature {
            r: r_bytes,
            s: s.to_bytes(),
        })
    }
}

impl VerifyingKey {
    /// Decodes a 32-byte x-only public key.
    ///
    /// Fails with [`SchnorrError::InvalidPoint`] if no curve point has that
    /// x-coordinate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let bytes: &[u8; PK_SIZE] = bytes
            .try_into()
            .map_err(|_| SchnorrError::InvalidPublicKeyLength)?;
        let point = Affine::from_x_only(bytes).ok_or(SchnorrError::InvalidPoint)?;
        Ok(Self { point })
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        self.point.to_x_only()
    }

    pub fn point(&self) -> &Affine {
        &self.point
    }

    /// Verifies a signature over a 32-byte message digest.
    ///
    /// Computes `R' = G * s + P * (n - e)` and accepts iff R' is a finite
    /// point with a quadratic-residue y whose x-coordinate equals `r`.
    /// Out-of-range `r` or `s` are rejected with `Ok(false)`.
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<bool, SchnorrError> {
        let msg: &[u8; MSG_SIZE] = msg
            .try_into()
            .map_err(|_| SchnorrError::InvalidMessageLength)?;

        let Some(r) = curve::BaseField::from_bytes(&sig.r) else {
            return Ok(false);
        };
        let Some(s) = ScalarField::from_bytes(&sig.s) else {
            return Ok(false);
        };

        let e = hash_challenge(&sig.r, &self.to_bytes(), msg);
        let lhs = <Affine as Group>::mul_generator(&s);
        let rhs = self.point * -e;

        match lhs.try_add(&rhs) {
            Ok(candidate) => Ok(!candidate.is_infinity()
                && candidate.has_quadratic_residue_y()
                && candidate.x == r),
            Err(_) => Ok(false),
        }
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}

fn with_residue_y(point: Affine) -> Affine {
    if point.has_quadratic_residue_y() {
        point
    } else {
        point.negate()
    }
}
