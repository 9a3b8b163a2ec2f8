use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::{BaseField, ScalarField};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for BaseField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

/// Sample a scalar in `[1, n-1]`, suitable as a secret key or nonce.
pub fn random_nonzero_scalar<R: Rng + ?Sized>(rng: &mut R) -> ScalarField {
    loop {
        let scalar = ScalarField::random(rng);
        if !scalar.is_zero() {
            return scalar;
        }
    }
}
