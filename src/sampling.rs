//! XOF-driven sampling: ExpandA, ExpandS, ExpandMask and SampleInBall
//! (FIPS 204 Algorithms 24-28).
//!
//! Rejection here branches only on XOF output, which is public; no secret
//! influences a branch in this module.

use crate::field::{Zq, Q};
use crate::packing;
use crate::params::N;
use crate::poly::Poly;
use crate::polyvec::PolyMat;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

// Keccak rate blocks, so each squeeze drains whole permutations.
const SHAKE128_RATE: usize = 168;
const SHAKE256_RATE: usize = 136;

/// Expands rho into the k x l matrix A, already in the NTT domain. Entry
/// (i, j) comes from SHAKE128(rho || j || i) by rejection of 23-bit chunks.
pub fn expand_a(rho: &[u8; 32], k: usize, l: usize, a: &mut PolyMat) {
    for i in 0..k {
        for j in 0..l {
            let mut hasher = Shake128::default();
            hasher.update(rho);
            hasher.update(&[j as u8, i as u8]);
            let mut xof = hasher.finalize_xof();

            let mut buf = [0u8; SHAKE128_RATE];
            let mut filled = 0;
            while filled < N {
                xof.read(&mut buf);
                let mut pos = 0;
                while pos + 3 <= buf.len() && filled < N {
                    let t = (buf[pos] as u32)
                        | ((buf[pos + 1] as u32) << 8)
                        | ((buf[pos + 2] as u32) << 16);
                    let t = t & 0x7FFFFF;
                    if t < Q {
                        a[i][j].c[filled] = Zq::new(t);
                        filled += 1;
                    }
                    pos += 3;
                }
            }
        }
    }
}

/// Samples one secret polynomial with coefficients in [-eta, eta] from
/// SHAKE256(rho_prime || nonce), one nibble per attempt.
pub fn expand_s(rho_prime: &[u8; 64], eta: u32, nonce: u16, p: &mut Poly) {
    let mut hasher = Shake256::default();
    hasher.update(rho_prime);
    hasher.update(&nonce.to_le_bytes());
    let mut xof = hasher.finalize_xof();

    let mut buf = [0u8; SHAKE256_RATE];
    let mut filled = 0;
    while filled < N {
        xof.read(&mut buf);
        for &b in buf.iter() {
            if filled == N {
                break;
            }
            for t in [(b & 0x0F) as u32, (b >> 4) as u32] {
                if filled == N {
                    break;
                }
                if eta == 2 {
                    if t < 15 {
                        let t = t - ((205 * t) >> 10) * 5; // t mod 5
                        p.c[filled] = Zq::new(eta) - Zq::new(t);
                        filled += 1;
                    }
                } else if t < 9 {
                    p.c[filled] = Zq::new(eta) - Zq::new(t);
                    filled += 1;
                }
            }
        }
    }
}

/// Expands the mask vector y; component i draws 32 * gamma1_bw bytes from
/// SHAKE256(rho_pp || kappa + i) and recenters them into (-gamma1, gamma1].
pub fn expand_mask(rho_pp: &[u8; 64], kappa: u16, gamma1: u32, gamma1_bw: usize, y: &mut [Poly]) {
    let mut buf = [0u8; 32 * 20];
    let take = 32 * gamma1_bw;
    for (i, p) in y.iter_mut().enumerate() {
        let nonce = kappa + i as u16;
        let mut hasher = Shake256::default();
        hasher.update(rho_pp);
        hasher.update(&nonce.to_le_bytes());
        let mut xof = hasher.finalize_xof();
        xof.read(&mut buf[..take]);
        packing::decode(&buf[..take], gamma1_bw, p);
        p.sub_from_x(gamma1);
    }
}

/// Samples the challenge polynomial with exactly tau coefficients in
/// {-1, +1} and the rest zero, seeded by the full c-tilde.
pub fn sample_in_ball(c_tilde: &[u8], tau: usize, c: &mut Poly) {
    *c = Poly::ZERO;
    let mut hasher = Shake256::default();
    hasher.update(c_tilde);
    let mut xof = hasher.finalize_xof();

    let mut sign_bytes = [0u8; 8];
    xof.read(&mut sign_bytes);
    let mut signs = u64::from_le_bytes(sign_bytes);

    for i in (N - tau)..N {
        let j = loop {
            let mut b = [0u8; 1];
            xof.read(&mut b);
            if (b[0] as usize) <= i {
                break b[0] as usize;
            }
        };
        c.c[i] = c.c[j];
        c.c[j] = if signs & 1 == 1 {
            Zq::new(Q - 1)
        } else {
            Zq::ONE
        };
        signs >>= 1;
    }
}
