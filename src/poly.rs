//! Degree-255 polynomials over Z_q and the rounding helpers of FIPS 204.
//!
//! A `Poly` does not remember whether it is in the coefficient or the NTT
//! domain; the sign/verify data flow keeps that straight. Pointwise
//! multiplication is only meaningful in the NTT domain, the rounding and
//! norm routines only in the coefficient domain.

use crate::field::{ct_max, Zq, Q};
use crate::ntt;
use crate::params::{D, N};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

const GAMMA2_LO: u32 = (Q - 1) / 88;
const GAMMA2_HI: u32 = (Q - 1) / 32;

/// An element of R_q = Z_q[X]/(X^256 + 1).
#[derive(Clone, Copy, Zeroize)]
pub struct Poly {
    pub(crate) c: [Zq; N],
}

impl Default for Poly {
    fn default() -> Self {
        Poly::ZERO
    }
}

impl Poly {
    pub const ZERO: Self = Poly { c: [Zq::ZERO; N] };

    /// Forward NTT, in place.
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.c);
    }

    /// Inverse NTT, in place.
    pub fn intt(&mut self) {
        ntt::intt(&mut self.c);
    }

    /// Coefficient-wise sum.
    pub fn add(&self, rhs: &Poly) -> Poly {
        let mut r = Poly::ZERO;
        for i in 0..N {
            r.c[i] = self.c[i] + rhs.c[i];
        }
        r
    }

    /// Coefficient-wise difference.
    pub fn sub(&self, rhs: &Poly) -> Poly {
        let mut r = Poly::ZERO;
        for i in 0..N {
            r.c[i] = self.c[i] - rhs.c[i];
        }
        r
    }

    pub fn add_assign(&mut self, rhs: &Poly) {
        for i in 0..N {
            self.c[i] = self.c[i] + rhs.c[i];
        }
    }

    pub fn sub_assign(&mut self, rhs: &Poly) {
        for i in 0..N {
            self.c[i] = self.c[i] - rhs.c[i];
        }
    }

    /// Coefficient-wise negation.
    pub fn neg_assign(&mut self) {
        for i in 0..N {
            self.c[i] = -self.c[i];
        }
    }

    /// Pointwise product; both operands must be in the NTT domain.
    pub fn pointwise(&self, rhs: &Poly) -> Poly {
        let mut r = Poly::ZERO;
        for i in 0..N {
            r.c[i] = self.c[i] * rhs.c[i];
        }
        r
    }

    /// Splits t into (t1, t0) with t = t1 * 2^d + t0, t0 in (-2^(d-1), 2^(d-1)].
    pub fn power2round(&self) -> (Poly, Poly) {
        let mut hi = Poly::ZERO;
        let mut lo = Poly::ZERO;
        for i in 0..N {
            let r = self.c[i].raw();
            let r1 = (r + (1 << (D - 1)) - 1) >> D;
            let r0 = r as i32 - ((r1 as i32) << D);
            hi.c[i] = Zq::new(r1);
            lo.c[i] = Zq::from_signed(r0);
        }
        (hi, lo)
    }

    /// Splits each coefficient r into (r1, r0) with r = r1 * alpha + r0
    /// mod q and r0 in (-alpha/2, alpha/2], low part in canonical form.
    pub fn decompose(&self, alpha: u32) -> (Poly, Poly) {
        let mut hi = Poly::ZERO;
        let mut lo = Poly::ZERO;
        for i in 0..N {
            let (r1, r0) = decompose_coeff(self.c[i].raw(), alpha >> 1);
            hi.c[i] = Zq::new(r1);
            lo.c[i] = Zq::from_signed(r0);
        }
        (hi, lo)
    }

    /// High part of decompose.
    pub fn high_bits(&self, alpha: u32) -> Poly {
        let mut r = Poly::ZERO;
        for i in 0..N {
            r.c[i] = Zq::new(decompose_coeff(self.c[i].raw(), alpha >> 1).0);
        }
        r
    }

    /// Low part of decompose, in canonical form.
    pub fn low_bits(&self, alpha: u32) -> Poly {
        let mut r = Poly::ZERO;
        for i in 0..N {
            r.c[i] = Zq::from_signed(decompose_coeff(self.c[i].raw(), alpha >> 1).1);
        }
        r
    }

    /// Hint bits: 1 where adding z moves r across a decompose boundary.
    pub fn make_hint(z: &Poly, r: &Poly, alpha: u32) -> Poly {
        let gamma2 = alpha >> 1;
        let mut h = Poly::ZERO;
        for i in 0..N {
            let r1 = decompose_coeff(r.c[i].raw(), gamma2).0;
            let v1 = decompose_coeff((r.c[i] + z.c[i]).raw(), gamma2).0;
            let differs: Choice = !r1.ct_eq(&v1);
            h.c[i] = Zq::new(differs.unwrap_u8() as u32);
        }
        h
    }

    /// Recovers the high bits of r + z from r and the hint bits.
    pub fn use_hint(h: &Poly, r: &Poly, alpha: u32) -> Poly {
        let m = (Q - 1) / alpha;
        let mut out = Poly::ZERO;
        for i in 0..N {
            let (r1, r0) = decompose_coeff(r.c[i].raw(), alpha >> 1);
            let up = r1 + 1;
            let up = u32::conditional_select(&up, &0, up.ct_eq(&m));
            let down = u32::conditional_select(&r1.wrapping_sub(1), &(m - 1), r1.ct_eq(&0));
            let positive = Choice::from((r0 > 0) as u8);
            let moved = u32::conditional_select(&down, &up, positive);
            let hint_set = h.c[i].raw().ct_eq(&1);
            out.c[i] = Zq::new(u32::conditional_select(&r1, &moved, hint_set));
        }
        out
    }

    /// Max over coefficients of the signed-centered magnitude.
    pub fn infinity_norm(&self) -> u32 {
        let mut res = 0u32;
        for i in 0..N {
            res = ct_max(res, self.c[i].norm());
        }
        res
    }

    /// Multiplies every coefficient by 2^d.
    pub fn shift_left(&mut self, d: usize) {
        let f = Zq::new(1 << d);
        for i in 0..N {
            self.c[i] = self.c[i] * f;
        }
    }

    /// Replaces each coefficient c with x - c. Applied before encoding a
    /// polynomial whose coefficients lie in [-x, x] and again after
    /// decoding; the map is its own inverse.
    pub fn sub_from_x(&mut self, x: u32) {
        let x = Zq::new(x);
        for i in 0..N {
            self.c[i] = x - self.c[i];
        }
    }

    /// Number of coefficients equal to one, for hint-weight accounting.
    pub fn count_ones(&self) -> usize {
        let mut cnt = 0u32;
        for i in 0..N {
            cnt += self.c[i].raw();
        }
        cnt as usize
    }
}

/// Decomposes canonical r as r1 * alpha + r0 with r0 in (-alpha/2, alpha/2],
/// wrapping the top band so r1 stays in [0, (q-1)/alpha). Returns r0 signed.
/// The magic multipliers replace a division per coefficient; there is one
/// pair per supported gamma2.
#[inline(always)]
fn decompose_coeff(r: u32, gamma2: u32) -> (u32, i32) {
    let a1 = (r + 127) >> 7;
    let a1 = if gamma2 == GAMMA2_HI {
        ((a1 * 1025 + (1 << 21)) >> 22) & 15
    } else {
        debug_assert_eq!(gamma2, GAMMA2_LO);
        let t = ((a1 * 11275 + (1 << 23)) >> 24) as i32;
        (t ^ (((43 - t) >> 31) & t)) as u32
    };
    let mut a0 = r as i32 - (a1 * 2 * gamma2) as i32;
    a0 -= ((((Q - 1) / 2) as i32 - a0) >> 31) & Q as i32;
    (a1, a0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;
    use rand_core::RngCore;

    fn random_poly(rng: &mut DeterministicRng) -> Poly {
        let mut p = Poly::ZERO;
        for i in 0..N {
            p.c[i] = Zq::new(rng.next_u32());
        }
        p
    }

    #[test]
    fn decompose_identity() {
        for alpha in [2 * GAMMA2_LO, 2 * GAMMA2_HI] {
            let gamma2 = alpha >> 1;
            let m = (Q - 1) / alpha;
            // include the top band where the wrap case triggers
            for r in (0..Q).step_by(997).chain(Q - 3..Q) {
                let (r1, r0) = decompose_coeff(r, gamma2);
                assert!(r1 < m, "r1 {} out of range for r {}", r1, r);
                assert!(r0 > -(gamma2 as i32 + 1) && r0 <= gamma2 as i32);
                let recomposed = (r1 as i64 * alpha as i64 + r0 as i64).rem_euclid(Q as i64);
                assert_eq!(recomposed as u32, r, "r = {}", r);
            }
        }
    }

    #[test]
    fn power2round_identity() {
        let mut rng = DeterministicRng::from_seed(b"poly-p2r");
        let t = random_poly(&mut rng);
        let (t1, t0) = t.power2round();
        for i in 0..N {
            let hi = t1.c[i].raw();
            assert!(hi < 1 << (23 - D));
            assert!(t0.c[i].norm() <= 1 << (D - 1));
            let back = (Zq::new(hi << D) + t0.c[i]).raw();
            assert_eq!(back, t.c[i].raw());
        }
    }

    #[test]
    fn hint_recovers_shifted_high_bits() {
        // use_hint(make_hint(z, r), r) = high_bits(r + z) whenever
        // ||z||_inf <= gamma2.
        let mut rng = DeterministicRng::from_seed(b"poly-hint");
        for alpha in [2 * GAMMA2_LO, 2 * GAMMA2_HI] {
            let gamma2 = alpha >> 1;
            for _ in 0..20 {
                let r = random_poly(&mut rng);
                let mut z = Poly::ZERO;
                for i in 0..N {
                    let mag = rng.next_u32() % gamma2;
                    let v = Zq::new(mag);
                    z.c[i] = if rng.next_u32() & 1 == 1 { -v } else { v };
                }
                let h = Poly::make_hint(&z, &r, alpha);
                let recovered = Poly::use_hint(&h, &r, alpha);
                let expected = r.add(&z).high_bits(alpha);
                for i in 0..N {
                    assert_eq!(recovered.c[i].raw(), expected.c[i].raw());
                }
            }
        }
    }

    #[test]
    fn sub_from_x_is_involution() {
        let mut p = Poly::ZERO;
        let mut rng = DeterministicRng::from_seed(b"poly-sfx");
        for i in 0..N {
            let v = Zq::new(rng.next_u32() % 3);
            p.c[i] = if rng.next_u32() & 1 == 1 { -v } else { v };
        }
        let orig = p;
        p.sub_from_x(2);
        for i in 0..N {
            assert!(p.c[i].raw() <= 4);
        }
        p.sub_from_x(2);
        for i in 0..N {
            assert_eq!(p.c[i].raw(), orig.c[i].raw());
        }
    }

    #[test]
    fn infinity_norm_tracks_extremes() {
        let mut p = Poly::ZERO;
        assert_eq!(p.infinity_norm(), 0);
        p.c[17] = Zq::new(Q - 9);
        p.c[200] = Zq::new(7);
        assert_eq!(p.infinity_norm(), 9);
    }
}
