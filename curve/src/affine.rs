// secp256k1 : y^2 = x^3 + 7 over GF(p), p = 2^256 - 2^32 - 977
// Generator (SEC 2):
//   x = 0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798
//   y = 0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8
// Curve prime order n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
// Curve cofactor: 1

use crate::basefield::BaseField;
use crate::errors::CurveError;
use crate::{Group, ScalarField};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Size of an x-only point encoding.
pub const X_ONLY_SIZE: usize = 32;

/// Size of a SEC1 compressed point encoding.
pub const COMPRESSED_SIZE: usize = 33;

/// Size of a SEC1 uncompressed point encoding.
pub const UNCOMPRESSED_SIZE: usize = 65;

const GENERATOR_X: [u64; 4] = [
    0x59f2815b16f81798,
    0x029bfcdb2dce28d9,
    0x55a06295ce870b07,
    0x79be667ef9dcbbac,
];

const GENERATOR_Y: [u64; 4] = [
    0x9c47d08ffb10d4b8,
    0xfd17b448a6855419,
    0x5da4fbfc0e1108a8,
    0x483ada7726a3c465,
];

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affine {
    /// The x-coordinate of the point
    pub x: BaseField,
    /// The y-coordinate of the point
    pub y: BaseField,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: BaseField::ZERO,
        y: BaseField::ZERO,
        is_infinity: true,
    };

    /// Create a new affine point without checking the curve equation.
    pub fn new(x: BaseField, y: BaseField) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    /// Create a point from coordinates, rejecting pairs off the curve.
    pub fn from_coordinates(x: BaseField, y: BaseField) -> Result<Self, CurveError> {
        let point = Affine::new(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CurveError::InvalidPoint)
        }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + 7.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        self.y.square() == curve_rhs(self.x)
    }

    /// The SEC 2 generator G.
    pub fn generator() -> Self {
        Affine::new(
            BaseField::from_canonical_limbs(GENERATOR_X),
            BaseField::from_canonical_limbs(GENERATOR_Y),
        )
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity {
            return *self;
        }

        // If y = 0, then 2P = O
        if self.y.is_zero() {
            return Self::INFINITY;
        }

        // λ = 3x^2 / 2y (a = 0 on secp256k1)
        let x2 = self.x.square();
        let numerator = x2 + x2 + x2;
        let denominator = self.y + self.y;
        let lambda = numerator * denominator.invert_nonzero();

        // x_r = λ^2 - 2x
        let x_r = lambda.square() - self.x - self.x;

        // y_r = λ(x - x_r) - y
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return *self;
        }
        Affine::new(self.x, -self.y)
    }

    /// Strict affine addition.
    ///
    /// Identity operands are absorbed and `P + P` doubles. Two points with the
    /// same x and different y fail with [`CurveError::InvalidPoint`] instead
    /// of producing the point at infinity.
    pub fn try_add(&self, other: &Self) -> Result<Self, CurveError> {
        if self.is_infinity {
            return Ok(*other);
        }
        if other.is_infinity {
            return Ok(*self);
        }
        if self.x == other.x {
            if self.y == other.y {
                return Ok(self.double());
            }
            return Err(CurveError::InvalidPoint);
        }
        Ok(self.add_distinct(other))
    }

    // Chord addition for points with distinct x-coordinates.
    fn add_distinct(&self, other: &Self) -> Self {
        // λ = (y2 - y1) / (x2 - x1)
        let numerator = other.y - self.y;
        let denominator = other.x - self.x;
        let lambda = numerator * denominator.invert_nonzero();

        // x_r = λ^2 - x1 - x2
        let x_r = lambda.square() - self.x - other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }

    /// True when y is a quadratic residue mod p, the canonical parity of
    /// x-only keys and Schnorr nonce points.
    pub fn has_quadratic_residue_y(&self) -> bool {
        !self.is_infinity && self.y.is_quadratic_residue()
    }

    /// Decode a 32-byte x-only encoding.
    ///
    /// The returned point carries the quadratic-residue y. Returns `None` when
    /// x is not below p or x^3 + 7 has no square root.
    pub fn from_x_only(bytes: &[u8; X_ONLY_SIZE]) -> Option<Self> {
        let x = BaseField::from_bytes(bytes)?;
        let y = curve_rhs(x).sqrt()?;
        Some(Affine::new(x, y))
    }

    /// 32-byte big-endian x-coordinate.
    pub fn to_x_only(&self) -> [u8; X_ONLY_SIZE] {
        self.x.to_bytes()
    }

    /// SEC1 compressed encoding: `0x02 || x` for even y, `0x03 || x` for odd y.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_SIZE] {
        let mut out = [0u8; COMPRESSED_SIZE];
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// SEC1 uncompressed encoding: `0x04 || x || y`.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_SIZE];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Decode a SEC1 compressed or uncompressed point.
    ///
    /// Returns `None` for unknown prefixes, wrong lengths and off-curve points.
    pub fn from_sec1(bytes: &[u8]) -> Option<Self> {
        match (bytes.len(), bytes.first()) {
            (COMPRESSED_SIZE, Some(&prefix)) if prefix == 0x02 || prefix == 0x03 => {
                let x_bytes: &[u8; 32] = bytes[1..].try_into().ok()?;
                let x = BaseField::from_bytes(x_bytes)?;
                let mut y = curve_rhs(x).sqrt()?;
                if y.is_odd() != (prefix == 0x03) {
                    y = -y;
                }
                Some(Affine::new(x, y))
            }
            (UNCOMPRESSED_SIZE, Some(&0x04)) => {
                let x_bytes: &[u8; 32] = bytes[1..33].try_into().ok()?;
                let y_bytes: &[u8; 32] = bytes[33..].try_into().ok()?;
                let x = BaseField::from_bytes(x_bytes)?;
                let y = BaseField::from_bytes(y_bytes)?;
                Affine::from_coordinates(x, y).ok()
            }
            _ => None,
        }
    }
}

// x^3 + 7
#[inline]
fn curve_rhs(x: BaseField) -> BaseField {
    x.square() * x + BaseField::curve_b()
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Affine::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

// Full group law: inverse pairs sum to the point at infinity.
impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match self.try_add(&other) {
            Ok(sum) => sum,
            Err(_) => Self::INFINITY,
        }
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Affine> for ScalarField {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).expect("hex");
        }
        out
    }

    #[test]
    fn test_infinity() {
        let inf = Affine::INFINITY;
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
    }

    #[test]
    fn test_generator_on_curve() {
        let g = Affine::generator();
        assert!(g.is_on_curve(), "Generator point is not on the curve");
        assert!(!g.is_infinity());
    }

    #[test]
    fn test_small_multiples() {
        let g = Affine::generator();
        let g2 = g.double();
        assert_eq!(
            g2.to_x_only(),
            hex32("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5")
        );
        assert_eq!(
            g2.y.to_bytes(),
            hex32("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a")
        );

        let g3 = g2 + g;
        assert_eq!(
            g3.to_x_only(),
            hex32("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9")
        );
        assert_eq!(
            g3.y.to_bytes(),
            hex32("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672")
        );
        assert_eq!(g.mul_u64(3), g3);
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Affine::generator();
        let inf = Affine::INFINITY;

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
        assert_eq!(g.try_add(&inf), Ok(g));
    }

    #[test]
    fn test_try_add_rejects_inverse_pair() {
        let g = Affine::generator();
        assert_eq!(g.try_add(&g.negate()), Err(CurveError::InvalidPoint));
        // The group-law operator maps the same pair to infinity.
        assert_eq!(g + g.negate(), Affine::INFINITY);
    }

    #[test]
    fn test_try_add_doubles_equal_points() {
        let g = Affine::generator();
        assert_eq!(g.try_add(&g), Ok(g.double()));
    }

    #[test]
    fn test_scalar_mul_zero() {
        let g = Affine::generator();
        assert_eq!(g * ScalarField::ZERO, Affine::INFINITY);
    }

    #[test]
    fn test_scalar_mul_one() {
        let g = Affine::generator();
        assert_eq!(g * ScalarField::ONE, g);
    }

    #[test]
    fn test_order_annihilates_generator() {
        let g = Affine::generator();
        let n_minus_one = -ScalarField::ONE;
        let almost = g * n_minus_one;
        assert_eq!(almost, g.negate());
        assert_eq!(almost + g, Affine::INFINITY);

        // n itself reduces to zero in the scalar field.
        let n = ScalarField::from_bytes_reduced(&ScalarField::order_bytes());
        assert_eq!(g * n, Affine::INFINITY);
    }

    #[test]
    fn test_associativity() {
        let g = Affine::generator();
        let a = ScalarField::from_canonical_u64(3);
        let b = ScalarField::from_canonical_u64(5);

        // (a + b) * G = a*G + b*G
        let left = g * (a + b);
        let right = g * a + g * b;

        assert_eq!(left, right);
    }

    #[test]
    fn test_x_only_round_trip() {
        let g = Affine::generator();
        for k in 1..8u64 {
            let p = g.mul_u64(k);
            let decoded = Affine::from_x_only(&p.to_x_only()).expect("on curve");
            if p.has_quadratic_residue_y() {
                assert_eq!(decoded, p);
            } else {
                assert_eq!(decoded, p.negate());
            }
            assert!(decoded.has_quadratic_residue_y());
        }
    }

    #[test]
    fn test_x_only_rejects_off_curve() {
        let mut bytes = [0u8; 32];
        bytes[31] = 5;
        assert_eq!(Affine::from_x_only(&bytes), None);
        assert_eq!(Affine::from_x_only(&[0xff; 32]), None);
    }

    #[test]
    fn test_compressed_encoding() {
        let g = Affine::generator();
        let compressed = g.to_compressed();
        assert_eq!(compressed[0], 0x02);
        assert_eq!(Affine::from_sec1(&compressed), Some(g));

        let neg = g.negate();
        assert_eq!(neg.to_compressed()[0], 0x03);
        assert_eq!(Affine::from_sec1(&neg.to_compressed()), Some(neg));
    }

    #[test]
    fn test_uncompressed_encoding() {
        let p = Affine::generator().mul_u64(7);
        assert_eq!(Affine::from_sec1(&p.to_uncompressed()), Some(p));

        let mut tampered = p.to_uncompressed();
        tampered[64] ^= 1;
        assert_eq!(Affine::from_sec1(&tampered), None);
        assert_eq!(Affine::from_sec1(&[0x05; 33]), None);
        assert_eq!(Affine::from_sec1(&[]), None);
    }

    #[test]
    fn test_group_properties() {
        let g = Affine::generator();

        // Test that doubling is the same as adding to itself
        assert_eq!(g.double(), g + g);

        // Test inverse property
        let h = g.mul_u64(5);
        let neg_h = -h;
        assert_eq!(h + neg_h, Affine::INFINITY);
        assert_eq!(h - h, Affine::INFINITY);
    }
}
