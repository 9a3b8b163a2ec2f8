//! Base field of secp256k1. p = 2^256 - 2^32 - 977
//!
//! Elements are kept in Montgomery form as `[u64; 4]` in little-endian order.

use core::fmt::{self, Display, Formatter};

use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arith::{self, impl_field_ops, Modulus};
use crate::errors::CurveError;

/// Element of GF(p), represented in Montgomery form.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseField {
    /// Montgomery form: value * R mod p, where R = 2^256
    limbs: [u64; 4],
}

pub(crate) const MODULUS: Modulus = Modulus {
    m: [
        0xfffffffefffffc2f,
        0xffffffffffffffff,
        0xffffffffffffffff,
        0xffffffffffffffff,
    ],
    r: [0x00000001000003d1, 0, 0, 0],
    r2: [0x000007a2000e90a1, 0x0000000000000001, 0, 0],
    mu: 0xd838091dd2253531,
    m_minus_2: [
        0xfffffffefffffc2d,
        0xffffffffffffffff,
        0xffffffffffffffff,
        0xffffffffffffffff,
    ],
};

// (p + 1) / 4, valid as a square root exponent because p = 3 mod 4.
const SQRT_EXP: [u64; 4] = [
    0xffffffffbfffff0c,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
];

// (p - 1) / 2, Euler's criterion exponent.
const EULER_EXP: [u64; 4] = [
    0xffffffff7ffffe17,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x7fffffffffffffff,
];

impl BaseField {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = BaseField { limbs: [0, 0, 0, 0] };

    /// One element (in Montgomery form: R mod p)
    pub const ONE: Self = BaseField { limbs: MODULUS.r };

    /// The curve constant b = 7 in y^2 = x^3 + b.
    pub fn curve_b() -> Self {
        Self::from_u64(7)
    }

    #[inline]
    pub fn from_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    #[inline]
    pub(crate) fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        BaseField {
            limbs: arith::to_montgomery(limbs, &MODULUS),
        }
    }

    #[inline]
    pub(crate) fn to_canonical_limbs(self) -> [u64; 4] {
        arith::from_montgomery(self.limbs, &MODULUS)
    }

    /// Decode 32 big-endian bytes. Returns `None` when the value is not below p.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let limbs = arith::limbs_from_be_bytes(bytes);
        if arith::is_canonical(limbs, MODULUS.m) {
            Some(Self::from_canonical_limbs(limbs))
        } else {
            None
        }
    }

    /// Decode 32 big-endian bytes, reducing modulo p.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        let limbs = arith::limbs_from_be_bytes(bytes);
        Self::from_canonical_limbs(arith::reduce_once(limbs, MODULUS.m))
    }

    /// Fixed-width big-endian encoding of the canonical value.
    pub fn to_bytes(&self) -> [u8; 32] {
        arith::limbs_to_be_bytes(&self.to_canonical_limbs())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        arith::is_zero(self.limbs)
    }

    /// Parity of the canonical value.
    pub fn is_odd(&self) -> bool {
        self.to_canonical_limbs()[0] & 1 == 1
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Raise to a 256-bit exponent given as little-endian limbs.
    pub fn pow(&self, exp: &[u64; 4]) -> Self {
        BaseField {
            limbs: arith::mont_pow(&self.limbs, exp, &MODULUS),
        }
    }

    /// Multiplicative inverse via Fermat's little theorem, a^(p-2).
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow(&MODULUS.m_minus_2))
    }

    /// a^(p-2) without the zero check, for callers that have already
    /// established `self != 0`.
    #[inline]
    pub(crate) fn invert_nonzero(&self) -> Self {
        self.pow(&MODULUS.m_minus_2)
    }

    /// Euler's criterion: a^((p-1)/2) == 1.
    ///
    /// Zero is not a quadratic residue under this definition.
    pub fn is_quadratic_residue(&self) -> bool {
        self.pow(&EULER_EXP) == Self::ONE
    }

    /// Square root a^((p+1)/4), or `None` if `self` has no square root.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&SQRT_EXP);
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }

    /// The modulus p as a big integer.
    pub fn order() -> BigUint {
        BigUint::from_bytes_be(&arith::limbs_to_be_bytes(&MODULUS.m))
    }
}

impl_field_ops!(BaseField, MODULUS);

impl Display for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Distribution<BaseField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BaseField {
        loop {
            let bytes: [u8; 32] = rng.random();
            if let Some(element) = BaseField::from_bytes(&bytes) {
                return element;
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
    fn test_modulus_is_three_mod_four() {
        assert_eq!(MODULUS.m[0] & 3, 3);
    }

    #[test]
    fn test_montgomery_round_trip() {
        let a = BaseField::from_u64(0x1234_5678_9abc_def0);
        assert_eq!(a.to_canonical_limbs(), [0x1234_5678_9abc_def0, 0, 0, 0]);
        assert_eq!(BaseField::ONE.to_canonical_limbs(), [1, 0, 0, 0]);
    }

    #[test]
    fn test_mul_matches_biguint() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = BaseField::order();
        for _ in 0..64 {
            let a: BaseField = rng.random();
            let b: BaseField = rng.random();
            let expected = (a.to_biguint() * b.to_biguint()) % &p;
            assert_eq!((a * b).to_biguint(), expected);
        }
    }

    #[test]
    fn test_add_sub_wraparound() {
        let minus_one = -BaseField::ONE;
        assert_eq!(minus_one + BaseField::ONE, BaseField::ZERO);
        assert_eq!(BaseField::ZERO - BaseField::ONE, minus_one);
        assert_eq!(minus_one.to_biguint(), BaseField::order() - 1u32);
        // (p-1) + (p-1) overflows 2^256 and must still reduce correctly.
        assert_eq!(minus_one + minus_one, -BaseField::from_u64(2));
    }

    #[test]
    fn test_invert() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let a: BaseField = rng.random();
            if a.is_zero() {
                continue;
            }
            let inv = a.invert().expect("nonzero");
            assert_eq!(a * inv, BaseField::ONE);
        }
    }

    #[test]
    fn test_invert_zero_fails() {
        assert_eq!(BaseField::ZERO.invert(), Err(CurveError::DivisionByZero));
    }

    #[test]
    fn test_sqrt_of_square() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..16 {
            let a: BaseField = rng.random();
            let sq = a.square();
            let root = sq.sqrt().expect("square has a root");
            assert!(root == a || root == -a);
            assert!(sq.is_zero() || sq.is_quadratic_residue());
        }
    }

    #[test]
    fn test_non_residue_has_no_sqrt() {
        // -1 is a non-residue when p = 3 mod 4.
        let minus_one = -BaseField::ONE;
        assert!(!minus_one.is_quadratic_residue());
        assert_eq!(minus_one.sqrt(), None);
    }

    #[test]
    fn test_bytes_canonical() {
        let p_bytes = arith::limbs_to_be_bytes(&MODULUS.m);
        assert_eq!(BaseField::from_bytes(&p_bytes), None);
        assert_eq!(BaseField::from_bytes_reduced(&p_bytes), BaseField::ZERO);

        let seven = BaseField::from_u64(7).to_bytes();
        assert_eq!(seven[31], 7);
        assert!(seven[..31].iter().all(|b| *b == 0));
    }
}
