//! Limb-level modular arithmetic shared by the base and scalar fields.
//!
//! Values are 256-bit integers stored as `[u64; 4]` in little-endian limb
//! order. Both secp256k1 moduli are close to 2^256, so every helper here
//! tracks the carry out of the top limb instead of assuming headroom.

/// Montgomery parameters for one prime modulus.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Modulus {
    /// The modulus m.
    pub m: [u64; 4],
    /// R = 2^256 mod m.
    pub r: [u64; 4],
    /// R^2 = 2^512 mod m.
    pub r2: [u64; 4],
    /// -m^{-1} mod 2^64.
    pub mu: u64,
    /// m - 2, the Fermat inversion exponent.
    pub m_minus_2: [u64; 4],
}

#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Plain 256-bit subtraction, returning the wrapped difference and the borrow.
#[inline]
pub(crate) const fn sub_limbs(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// True when `limbs < m`.
#[inline]
pub(crate) const fn is_canonical(limbs: [u64; 4], m: [u64; 4]) -> bool {
    let (_, borrow) = sub_limbs(limbs, m);
    borrow
}

#[inline]
pub(crate) const fn is_zero(limbs: [u64; 4]) -> bool {
    limbs[0] == 0 && limbs[1] == 0 && limbs[2] == 0 && limbs[3] == 0
}

/// (a + b) mod m for canonical inputs.
#[inline]
pub(crate) const fn add_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);

    let sum = [r0, r1, r2, r3];
    let (reduced, borrow) = sub_limbs(sum, m);

    // A carry out of the top limb means the sum exceeded 2^256 > m.
    if carry || !borrow {
        reduced
    } else {
        sum
    }
}

/// (a - b) mod m for canonical inputs.
#[inline]
pub(crate) const fn sub_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (diff, borrow) = sub_limbs(a, b);
    if borrow {
        let (r0, carry) = diff[0].overflowing_add(m[0]);
        let (r1, carry) = carrying_add(diff[1], m[1], carry);
        let (r2, carry) = carrying_add(diff[2], m[2], carry);
        let (r3, _) = carrying_add(diff[3], m[3], carry);
        [r0, r1, r2, r3]
    } else {
        diff
    }
}

#[inline]
pub(crate) const fn neg_mod(a: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    if is_zero(a) {
        return [0, 0, 0, 0];
    }
    sub_mod(m, a, m)
}

/// Reduce any 256-bit value into `[0, m)`.
///
/// One conditional subtraction suffices because `2m > 2^256` holds for both
/// secp256k1 moduli.
#[inline]
pub(crate) const fn reduce_once(limbs: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (reduced, borrow) = sub_limbs(limbs, m);
    if borrow {
        limbs
    } else {
        reduced
    }
}

/// Montgomery multiplication (CIOS): `a * b * R^{-1} mod m`.
#[inline]
pub(crate) fn mont_mul(a: &[u64; 4], b: &[u64; 4], modulus: &Modulus) -> [u64; 4] {
    let m = &modulus.m;
    let mut t = [0u64; 6];

    for i in 0..4 {
        let mut carry = 0u64;
        for j in 0..4 {
            let wide = (a[j] as u128) * (b[i] as u128) + (t[j] as u128) + (carry as u128);
            t[j] = wide as u64;
            carry = (wide >> 64) as u64;
        }
        let wide = (t[4] as u128) + (carry as u128);
        t[4] = wide as u64;
        t[5] = (wide >> 64) as u64;

        let k = t[0].wrapping_mul(modulus.mu);
        let wide = (k as u128) * (m[0] as u128) + (t[0] as u128);
        let mut carry = (wide >> 64) as u64;
        for j in 1..4 {
            let wide = (k as u128) * (m[j] as u128) + (t[j] as u128) + (carry as u128);
            t[j - 1] = wide as u64;
            carry = (wide >> 64) as u64;
        }
        let wide = (t[4] as u128) + (carry as u128);
        t[3] = wide as u64;
        t[4] = t[5] + ((wide >> 64) as u64);
    }

    // t < 2m here; t[4] holds the bit above 2^256.
    let result = [t[0], t[1], t[2], t[3]];
    let (reduced, borrow) = sub_limbs(result, *m);
    if t[4] != 0 || !borrow {
        reduced
    } else {
        result
    }
}

/// Square-and-multiply exponentiation over Montgomery-form limbs.
///
/// `one` is the Montgomery form of 1 (that is, R mod m). The loop runs over
/// all 256 exponent bits.
pub(crate) fn mont_pow(base: &[u64; 4], exp: &[u64; 4], modulus: &Modulus) -> [u64; 4] {
    let mut result = modulus.r;
    for limb in exp.iter().rev() {
        for bit in (0..64).rev() {
            result = mont_mul(&result, &result, modulus);
            if (limb >> bit) & 1 == 1 {
                result = mont_mul(&result, base, modulus);
            }
        }
    }
    result
}

#[inline]
pub(crate) fn to_montgomery(limbs: [u64; 4], modulus: &Modulus) -> [u64; 4] {
    mont_mul(&limbs, &modulus.r2, modulus)
}

#[inline]
pub(crate) fn from_montgomery(limbs: [u64; 4], modulus: &Modulus) -> [u64; 4] {
    mont_mul(&limbs, &[1, 0, 0, 0], modulus)
}

/// Big-endian 32 bytes to little-endian limbs.
#[inline]
pub(crate) fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = 24 - i * 8;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

/// Little-endian limbs to big-endian 32 bytes.
#[inline]
pub(crate) fn limbs_to_be_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let start = 24 - i * 8;
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

/// Implements the arithmetic operator traits for a Montgomery field type
/// with a `limbs` field and a `MODULUS: Modulus` constant in scope.
macro_rules! impl_field_ops {
    ($field:ident, $modulus:ident) => {
        impl core::ops::Add for $field {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    limbs: $crate::arith::add_mod(self.limbs, rhs.limbs, $modulus.m),
                }
            }
        }

        impl core::ops::AddAssign for $field {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl core::ops::Sub for $field {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    limbs: $crate::arith::sub_mod(self.limbs, rhs.limbs, $modulus.m),
                }
            }
        }

        impl core::ops::SubAssign for $field {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl core::ops::Mul for $field {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self {
                    limbs: $crate::arith::mont_mul(&self.limbs, &rhs.limbs, &$modulus),
                }
            }
        }

        impl core::ops::MulAssign for $field {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl core::ops::Neg for $field {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self {
                    limbs: $crate::arith::neg_mod(self.limbs, $modulus.m),
                }
            }
        }

        impl core::fmt::Debug for $field {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}(0x", stringify!($field))?;
                for byte in self.to_bytes() {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, ")")
            }
        }
    };
}

pub(crate) use impl_field_ops;
