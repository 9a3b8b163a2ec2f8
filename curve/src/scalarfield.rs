//! Scalar field of secp256k1. n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.

use core::fmt::{self, Display, Formatter};

use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arith::{self, impl_field_ops, Modulus};
use crate::errors::CurveError;
use crate::group::ScalarBits;

/// Scalar field element for the curve
/// Represented in Montgomery form with [u64; 4]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScalarField {
    /// Montgomery form: value * R mod n, where R = 2^256
    limbs: [u64; 4],
}

pub(crate) const MODULUS: Modulus = Modulus {
    m: [
        0xbfd25e8cd0364141,
        0xbaaedce6af48a03b,
        0xfffffffffffffffe,
        0xffffffffffffffff,
    ],
    r: [
        0x402da1732fc9bebf,
        0x4551231950b75fc4,
        0x0000000000000001,
        0x0000000000000000,
    ],
    r2: [
        0x896cf21467d7d140,
        0x741496c20e7cf878,
        0xe697f5e45bcd07c6,
        0x9d671cd581c69bc5,
    ],
    mu: 0x4b0dff665588b13f,
    m_minus_2: [
        0xbfd25e8cd036413f,
        0xbaaedce6af48a03b,
        0xfffffffffffffffe,
        0xffffffffffffffff,
    ],
};

// floor(n / 2), the low-s boundary.
const HALF_ORDER: [u64; 4] = [
    0xdfe92f46681b20a0,
    0x5d576e7357a4501d,
    0xffffffffffffffff,
    0x7fffffffffffffff,
];

impl ScalarField {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = ScalarField { limbs: [0, 0, 0, 0] };

    /// One element (in Montgomery form: R mod n)
    pub const ONE: Self = ScalarField { limbs: MODULUS.r };

    /// Create a new scalar field element from a u64 value
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    #[inline]
    pub(crate) fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        ScalarField {
            limbs: arith::to_montgomery(limbs, &MODULUS),
        }
    }

    /// Convert from Montgomery form to canonical little-endian limbs.
    #[inline]
    pub fn to_canonical_u64_vec(&self) -> [u64; 4] {
        arith::from_montgomery(self.limbs, &MODULUS)
    }

    /// Decode 32 big-endian bytes. Returns `None` when the value is not below n.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let limbs = arith::limbs_from_be_bytes(bytes);
        if arith::is_canonical(limbs, MODULUS.m) {
            Some(Self::from_canonical_limbs(limbs))
        } else {
            None
        }
    }

    /// Decode 32 big-endian bytes, reducing modulo n. Used for hash outputs.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        let limbs = arith::limbs_from_be_bytes(bytes);
        Self::from_canonical_limbs(arith::reduce_once(limbs, MODULUS.m))
    }

    /// Fixed-width big-endian encoding of the canonical value.
    pub fn to_bytes(&self) -> [u8; 32] {
        arith::limbs_to_be_bytes(&self.to_canonical_u64_vec())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        arith::is_zero(self.limbs)
    }

    /// True when the canonical value is greater than n / 2.
    pub fn is_high(&self) -> bool {
        let (_, borrow) = arith::sub_limbs(HALF_ORDER, self.to_canonical_u64_vec());
        borrow
    }

    pub fn pow(&self, exp: &[u64; 4]) -> Self {
        ScalarField {
            limbs: arith::mont_pow(&self.limbs, exp, &MODULUS),
        }
    }

    /// Multiplicative inverse via Fermat's little theorem, a^(n-2).
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow(&MODULUS.m_minus_2))
    }

    pub fn as_canonical_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }

    /// The group order n as a big integer.
    pub fn order() -> BigUint {
        BigUint::from_bytes_be(&arith::limbs_to_be_bytes(&MODULUS.m))
    }

    /// The group order n as big-endian bytes.
    pub fn order_bytes() -> [u8; 32] {
        arith::limbs_to_be_bytes(&MODULUS.m)
    }
}

impl_field_ops!(ScalarField, MODULUS);

impl ScalarBits for ScalarField {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_u64_vec()
    }
}

impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Distribution<ScalarField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalarField {
        loop {
            let bytes: [u8; 32] = rng.random();
            if let Some(scalar) = ScalarField::from_bytes(&bytes) {
                return scalar;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_one() {
        assert!(ScalarField::ZERO.is_zero());
        assert_eq!(ScalarField::ONE.to_canonical_u64_vec(), [1, 0, 0, 0]);
        assert_eq!(ScalarField::ONE * ScalarField::ONE, ScalarField::ONE);
    }

    #[test]
    fn test_mul_matches_biguint() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = ScalarField::order();
        for _ in 0..64 {
            let a: ScalarField = rng.random();
            let b: ScalarField = rng.random();
            let expected = (a.as_canonical_biguint() * b.as_canonical_biguint()) % &n;
            assert_eq!((a * b).as_canonical_biguint(), expected);
            let expected = (a.as_canonical_biguint() + b.as_canonical_biguint()) % &n;
            assert_eq!((a + b).as_canonical_biguint(), expected);
        }
    }

    #[test]
    fn test_invert() {
        let a = ScalarField::from_canonical_u64(123456789);
        let inv = a.invert().expect("nonzero");
        assert_eq!(a * inv, ScalarField::ONE);
        assert_eq!(ScalarField::ZERO.invert(), Err(CurveError::DivisionByZero));
    }

    #[test]
    fn test_order_reduces_to_zero() {
        let n = ScalarField::order_bytes();
        assert_eq!(ScalarField::from_bytes(&n), None);
        assert!(ScalarField::from_bytes_reduced(&n).is_zero());

        let all_ones = [0xffu8; 32];
        let reduced = ScalarField::from_bytes_reduced(&all_ones);
        let expected = BigUint::from_bytes_be(&all_ones) % ScalarField::order();
        assert_eq!(reduced.as_canonical_biguint(), expected);
    }

    #[test]
    fn test_is_high() {
        let half = ScalarField::from_bytes(&arith::limbs_to_be_bytes(&HALF_ORDER)).expect("canonical");
        assert!(!half.is_high());
        assert!((half + ScalarField::ONE).is_high());
        assert!(!ScalarField::ONE.is_high());
        assert!((-ScalarField::ONE).is_high());
        // n - s flips the half for any nonzero s.
        assert!(!(-(half + ScalarField::ONE)).is_high());
    }

    #[test]
    fn test_scalar_bits_are_canonical() {
        let a = ScalarField::from_canonical_u64(5);
        assert_eq!(a.to_u64_limbs(), [5, 0, 0, 0]);
    }
}
