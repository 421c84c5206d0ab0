//! Componentwise lifts of the polynomial routines to vectors of k or l
//! polynomials, plus the k x l matrix-by-vector product in the NTT domain.
//!
//! Vectors are plain slices; the parameter set decides their length, so the
//! same code serves every security level.

use crate::field::ct_max;
use crate::params::{K_MAX, L_MAX};
use crate::poly::Poly;

/// A k x l matrix of polynomials in the NTT domain, sized for the largest
/// parameter set; only the leading k x l block is used.
pub type PolyMat = [[Poly; L_MAX]; K_MAX];

pub fn ntt(vec: &mut [Poly]) {
    for p in vec.iter_mut() {
        p.ntt();
    }
}

pub fn intt(vec: &mut [Poly]) {
    for p in vec.iter_mut() {
        p.intt();
    }
}

pub fn add_assign(dst: &mut [Poly], src: &[Poly]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.add_assign(s);
    }
}

pub fn sub_assign(dst: &mut [Poly], src: &[Poly]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.sub_assign(s);
    }
}

pub fn neg(vec: &mut [Poly]) {
    for p in vec.iter_mut() {
        p.neg_assign();
    }
}

pub fn sub_from_x(vec: &mut [Poly], x: u32) {
    for p in vec.iter_mut() {
        p.sub_from_x(x);
    }
}

pub fn shift_left(vec: &mut [Poly], d: usize) {
    for p in vec.iter_mut() {
        p.shift_left(d);
    }
}

/// w = A * y with every operand in the NTT domain; w.len() rows of A against
/// y.len() columns.
pub fn matrix_mul(a: &PolyMat, y: &[Poly], w: &mut [Poly]) {
    for (i, out) in w.iter_mut().enumerate() {
        let mut acc = Poly::ZERO;
        for (j, col) in y.iter().enumerate() {
            acc.add_assign(&a[i][j].pointwise(col));
        }
        *out = acc;
    }
}

/// dst = c * src pointwise per component; NTT domain.
pub fn mul_poly(c: &Poly, src: &[Poly], dst: &mut [Poly]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = c.pointwise(s);
    }
}

pub fn power2round(src: &[Poly], hi: &mut [Poly], lo: &mut [Poly]) {
    for (i, p) in src.iter().enumerate() {
        let (h, l) = p.power2round();
        hi[i] = h;
        lo[i] = l;
    }
}

pub fn high_bits(src: &[Poly], dst: &mut [Poly], alpha: u32) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = s.high_bits(alpha);
    }
}

pub fn low_bits(src: &[Poly], dst: &mut [Poly], alpha: u32) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = s.low_bits(alpha);
    }
}

pub fn make_hint(z: &[Poly], r: &[Poly], dst: &mut [Poly], alpha: u32) {
    for i in 0..dst.len() {
        dst[i] = Poly::make_hint(&z[i], &r[i], alpha);
    }
}

pub fn use_hint(h: &[Poly], r: &[Poly], dst: &mut [Poly], alpha: u32) {
    for i in 0..dst.len() {
        dst[i] = Poly::use_hint(&h[i], &r[i], alpha);
    }
}

pub fn infinity_norm(vec: &[Poly]) -> u32 {
    let mut res = 0u32;
    for p in vec.iter() {
        res = ct_max(res, p.infinity_norm());
    }
    res
}

pub fn count_ones(vec: &[Poly]) -> usize {
    vec.iter().map(|p| p.count_ones()).sum()
}
