//! Number-theoretic transform over Z_q for degree-255 polynomials.
//!
//! Forward transform is in-place Cooley-Tukey, inverse is Gentleman-Sande,
//! with NTT-domain coefficients in bit-reversed order (FIPS 204 Section 7.5).
//! The twiddle tables are derived from the 512th root of unity at compile
//! time instead of being pasted in.

use crate::field::{mul_mod, Zq, Q};

/// Polynomial degree bound; elements of R_q have N coefficients.
pub const N: usize = 256;

/// Primitive 512th root of unity mod q.
const ZETA: u32 = 1753;

/// 256^-1 mod q, applied at the tail of the inverse transform.
const INV_N: u32 = pow_mod(N as u32, Q - 2);

const fn pow_mod(base: u32, mut e: u32) -> u32 {
    let mut b = base;
    let mut acc = 1u32;
    while e != 0 {
        if e & 1 == 1 {
            acc = mul_mod(acc, b);
        }
        b = mul_mod(b, b);
        e >>= 1;
    }
    acc
}

const fn bitrev8(i: u32) -> u32 {
    let mut r = 0u32;
    let mut j = 0;
    while j < 8 {
        r = (r << 1) | ((i >> j) & 1);
        j += 1;
    }
    r
}

/// zeta^bitrev8(i) for i in 0..256, the bit-reversed twiddle table.
const ZETAS: [u32; N] = {
    let mut t = [0u32; N];
    let mut i = 0;
    while i < N {
        t[i] = pow_mod(ZETA, bitrev8(i as u32));
        i += 1;
    }
    t
};

// zeta really is a primitive 512th root: zeta^256 = -1.
const _: () = assert!(pow_mod(ZETA, 256) == Q - 1);
const _: () = assert!(mul_mod(INV_N, N as u32) == 1);

/// In-place forward NTT. Output coefficients are in bit-reversed order.
pub fn ntt(p: &mut [Zq; N]) {
    let mut k = 0usize;
    let mut len = N / 2;
    while len > 0 {
        let mut start = 0;
        while start < N {
            k += 1;
            let zeta = Zq::new(ZETAS[k]);
            for j in start..start + len {
                let t = zeta * p[j + len];
                p[j + len] = p[j] - t;
                p[j] = p[j] + t;
            }
            start += 2 * len;
        }
        len >>= 1;
    }
}

/// In-place inverse NTT, including the final multiplication by 256^-1.
pub fn intt(p: &mut [Zq; N]) {
    let mut k = N;
    let mut len = 1;
    while len < N {
        let mut start = 0;
        while start < N {
            k -= 1;
            let zeta = -Zq::new(ZETAS[k]);
            for j in start..start + len {
                let t = p[j];
                p[j] = t + p[j + len];
                p[j + len] = zeta * (t - p[j + len]);
            }
            start += 2 * len;
        }
        len <<= 1;
    }
    let f = Zq::new(INV_N);
    for c in p.iter_mut() {
        *c = f * *c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;
    use rand_core::RngCore;

    fn random_poly(rng: &mut DeterministicRng) -> [Zq; N] {
        let mut p = [Zq::ZERO; N];
        for c in p.iter_mut() {
            *c = Zq::new(rng.next_u32());
        }
        p
    }

    #[test]
    fn round_trip() {
        let mut rng = DeterministicRng::from_seed(b"ntt-round-trip");
        for _ in 0..100 {
            let p = random_poly(&mut rng);
            let mut q = p;
            ntt(&mut q);
            intt(&mut q);
            assert_eq!(p.map(|c| c.raw()), q.map(|c| c.raw()));
        }
    }

    #[test]
    fn constant_transforms_to_constant() {
        // A degree-0 polynomial evaluates to its constant at every root.
        let mut p = [Zq::ZERO; N];
        p[0] = Zq::new(12345);
        ntt(&mut p);
        for c in p.iter() {
            assert_eq!(c.raw(), 12345);
        }
        intt(&mut p);
        assert_eq!(p[0].raw(), 12345);
        for c in p.iter().skip(1) {
            assert_eq!(c.raw(), 0);
        }
    }
}
