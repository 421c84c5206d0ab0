//! Arithmetic over the ML-DSA prime field Z_q, q = 2^23 - 2^13 + 1 (FIPS 204).
//!
//! Elements are kept in canonical form [0, q) as `u32`. Multiplication goes
//! through Montgomery reduction with R = 2^32; the Montgomery constants are
//! computed at compile time so there is nothing to transcribe.

use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{ConditionallySelectable, ConstantTimeEq, ConstantTimeLess};
use zeroize::DefaultIsZeroes;

/// The prime modulus q = 8380417.
pub const Q: u32 = 8380417;

/// -q^-1 mod 2^32, used by Montgomery reduction.
const QINV_NEG: u32 = neg_qinv();

/// R^2 mod q, folds the Montgomery factor back out after a reduction.
const R2: u32 = ((1u128 << 64) % (Q as u128)) as u32;

const fn neg_qinv() -> u32 {
    // Newton iteration for q^-1 mod 2^32; q is odd so five steps suffice.
    let mut x = Q;
    let mut i = 0;
    while i < 5 {
        x = x.wrapping_mul(2u32.wrapping_sub(Q.wrapping_mul(x)));
        i += 1;
    }
    x.wrapping_neg()
}

// q * q^-1 == 1 mod 2^32
const _: () = assert!(Q.wrapping_mul(QINV_NEG.wrapping_neg()) == 1);

/// Reduces r in [0, 2q) to canonical form without branching.
#[inline(always)]
pub(crate) const fn reduce_once(r: u32) -> u32 {
    let t = r.wrapping_sub(Q);
    t.wrapping_add(Q & (((t as i32) >> 31) as u32))
}

/// t * 2^-32 mod q in canonical form, for t < q * 2^32.
#[inline(always)]
const fn mont_reduce(t: u64) -> u32 {
    let m = (t as u32).wrapping_mul(QINV_NEG);
    let r = ((t + (m as u64) * (Q as u64)) >> 32) as u32;
    reduce_once(r)
}

/// a * b mod q in canonical form. Two Montgomery passes: the second folds
/// R^2 in so the spare R^-1 cancels.
#[inline(always)]
pub(crate) const fn mul_mod(a: u32, b: u32) -> u32 {
    mont_reduce(mont_reduce((a as u64) * (b as u64)) as u64 * (R2 as u64))
}

/// Branch-free min of two words.
#[inline(always)]
pub(crate) fn ct_min(a: u32, b: u32) -> u32 {
    u32::conditional_select(&a, &b, b.ct_lt(&a))
}

/// Branch-free max of two words.
#[inline(always)]
pub(crate) fn ct_max(a: u32, b: u32) -> u32 {
    u32::conditional_select(&a, &b, a.ct_lt(&b))
}

/// An element of Z_q in canonical form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zq(u32);

impl DefaultIsZeroes for Zq {}

impl Zq {
    pub const ZERO: Self = Zq(0);
    pub const ONE: Self = Zq(1);

    /// Wraps a representative, reducing it into [0, q).
    #[inline(always)]
    pub const fn new(v: u32) -> Self {
        Zq(v % Q)
    }

    /// Canonical representative of a signed value in (-q, q).
    #[inline(always)]
    pub(crate) fn from_signed(v: i32) -> Self {
        Zq(v.wrapping_add((Q as i32) & (v >> 31)) as u32)
    }

    /// The canonical representative.
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Signed-centered magnitude min(x, q - x), the infinity-norm view.
    #[inline(always)]
    pub fn norm(self) -> u32 {
        ct_min(self.0, reduce_once(Q - self.0))
    }

    /// Square-and-multiply exponentiation. Exponents are public in this
    /// scheme, so the data-dependent branch is acceptable.
    pub fn pow(self, mut e: u32) -> Self {
        let mut base = self;
        let mut acc = Zq::ONE;
        while e != 0 {
            if e & 1 == 1 {
                acc *= base;
            }
            base *= base;
            e >>= 1;
        }
        acc
    }

    /// Multiplicative inverse by Fermat's little theorem; inv(0) = 0.
    pub fn inv(self) -> Self {
        self.pow(Q - 2)
    }
}

impl Add for Zq {
    type Output = Zq;
    #[inline(always)]
    fn add(self, rhs: Zq) -> Zq {
        Zq(reduce_once(self.0 + rhs.0))
    }
}

impl Sub for Zq {
    type Output = Zq;
    #[inline(always)]
    fn sub(self, rhs: Zq) -> Zq {
        let t = self.0.wrapping_sub(rhs.0);
        Zq(t.wrapping_add(Q & (((t as i32) >> 31) as u32)))
    }
}

impl Neg for Zq {
    type Output = Zq;
    #[inline(always)]
    fn neg(self) -> Zq {
        Zq::ZERO - self
    }
}

impl Mul for Zq {
    type Output = Zq;
    #[inline(always)]
    fn mul(self, rhs: Zq) -> Zq {
        Zq(mul_mod(self.0, rhs.0))
    }
}

impl Div for Zq {
    type Output = Zq;
    /// Multiply-by-inverse, with the convention 0/0 = 0.
    #[inline(always)]
    fn div(self, rhs: Zq) -> Zq {
        self * rhs.inv()
    }
}

impl AddAssign for Zq {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Zq) {
        *self = *self + rhs;
    }
}

impl SubAssign for Zq {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Zq) {
        *self = *self - rhs;
    }
}

impl MulAssign for Zq {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Zq) {
        *self = *self * rhs;
    }
}

impl ConstantTimeEq for Zq {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0.ct_eq(&other.0)
    }
}
