//! Bit-level codecs: fixed-width polynomial serialization and the sparse
//! hint encoding of FIPS 204 Section 7.1.
//!
//! A polynomial at `bits` bits per coefficient occupies exactly 32 * bits
//! bytes, little-endian within the bit stream. The supported widths are
//! 3, 4, 6, 10, 13, 18 and 20.

use crate::field::Zq;
use crate::params::N;
use crate::poly::Poly;

/// Serializes 256 coefficients at `bits` bits each into out.
pub fn encode(p: &Poly, bits: usize, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 32 * bits);
    let mask = (1u64 << bits) - 1;
    let mut acc = 0u64;
    let mut acc_bits = 0usize;
    let mut idx = 0usize;
    for i in 0..N {
        acc |= ((p.c[i].raw() as u64) & mask) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            out[idx] = (acc & 0xFF) as u8;
            idx += 1;
            acc >>= 8;
            acc_bits -= 8;
        }
    }
}

/// Inverse of `encode`; coefficients come back masked to `bits` bits.
pub fn decode(bytes: &[u8], bits: usize, p: &mut Poly) {
    debug_assert_eq!(bytes.len(), 32 * bits);
    let mask = (1u64 << bits) - 1;
    let mut acc = 0u64;
    let mut acc_bits = 0usize;
    let mut idx = 0usize;
    for i in 0..N {
        while acc_bits < bits {
            acc |= (bytes[idx] as u64) << acc_bits;
            acc_bits += 8;
            idx += 1;
        }
        p.c[i] = Zq::new((acc & mask) as u32);
        acc >>= bits;
        acc_bits -= bits;
    }
}

/// Packs a hint vector with at most omega set bits into omega + k bytes:
/// the ascending 1-bit indices of every polynomial in turn, then the
/// running totals, one per polynomial. Unused index slots stay zero.
pub fn encode_hint(h: &[Poly], omega: usize, out: &mut [u8]) {
    let k = h.len();
    debug_assert_eq!(out.len(), omega + k);
    for b in out.iter_mut() {
        *b = 0;
    }
    let mut off = 0usize;
    for (i, p) in h.iter().enumerate() {
        for j in 0..N {
            if p.c[j].raw() == 1 {
                out[off] = j as u8;
                off += 1;
            }
        }
        out[omega + i] = off as u8;
    }
}

/// Strict inverse of `encode_hint`. Returns false if the running totals are
/// not monotonic or exceed omega, if any polynomial's indices fail to
/// strictly ascend, or if the padding after the final index is non-zero.
pub fn decode_hint(bytes: &[u8], k: usize, omega: usize, h: &mut [Poly]) -> bool {
    debug_assert_eq!(bytes.len(), omega + k);
    for p in h.iter_mut() {
        *p = Poly::ZERO;
    }
    let mut off = 0usize;
    for i in 0..k {
        let cnt = bytes[omega + i] as usize;
        if cnt < off || cnt > omega {
            return false;
        }
        let mut prev: i32 = -1;
        for &idx in &bytes[off..cnt] {
            if (idx as i32) <= prev {
                return false;
            }
            prev = idx as i32;
            h[i].c[idx as usize] = Zq::ONE;
        }
        off = cnt;
    }
    for &b in &bytes[off..omega] {
        if b != 0 {
            return false;
        }
    }
    true
}
