//! The three ML-DSA operations over a parameter set: key generation,
//! Fiat-Shamir-with-aborts signing, and verification (FIPS 204
//! Algorithms 1, 2 and 3).
//!
//! All scratch is stack-resident and sized for the largest parameter set;
//! only the leading k (or l) entries of each buffer are touched. Buffers
//! that ever hold secret material are zeroized before returning.

use crate::error::MlDsaError;
use crate::hash;
use crate::packing;
use crate::params::{ParamSet, D, K_MAX, L_MAX, MU_BYTES, RND_BYTES, SEED_BYTES, TR_BYTES};
use crate::poly::Poly;
use crate::polyvec;
use crate::sampling;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Cap on rejection-loop restarts. Honest inputs terminate within a few
/// iterations, so exhausting this is surfaced as a fatal error.
const MAX_SIGN_ATTEMPTS: usize = 1000;

const CTILDE_MAX: usize = 64;
const W1_ENC_MAX: usize = K_MAX * 32 * 6;

/// Expands a 32-byte seed into a serialized keypair.
pub(crate) fn keygen(p: &ParamSet, seed: &[u8; SEED_BYTES], pk: &mut [u8], sk: &mut [u8]) {
    debug_assert_eq!(pk.len(), p.pubkey_bytes());
    debug_assert_eq!(sk.len(), p.seckey_bytes());
    let (k, l) = (p.k, p.l);
    let eta_bw = p.eta_bw();
    let t1_bw = 23 - D;

    // seed -> rho || rho' || K
    let mut expanded = [0u8; 128];
    hash::shake256(&[seed.as_slice()], &mut expanded);
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&expanded[..32]);
    let mut rho_prime = [0u8; 64];
    rho_prime.copy_from_slice(&expanded[32..96]);

    let mut a = [[Poly::ZERO; L_MAX]; K_MAX];
    sampling::expand_a(&rho, k, l, &mut a);

    let mut s1 = [Poly::ZERO; L_MAX];
    let mut s2 = [Poly::ZERO; K_MAX];
    for i in 0..l {
        sampling::expand_s(&rho_prime, p.eta, i as u16, &mut s1[i]);
    }
    for i in 0..k {
        sampling::expand_s(&rho_prime, p.eta, (l + i) as u16, &mut s2[i]);
    }

    // t = A * s1 + s2
    let mut s1_hat = s1;
    polyvec::ntt(&mut s1_hat[..l]);
    let mut t = [Poly::ZERO; K_MAX];
    polyvec::matrix_mul(&a, &s1_hat[..l], &mut t[..k]);
    polyvec::intt(&mut t[..k]);
    polyvec::add_assign(&mut t[..k], &s2[..k]);

    let mut t1 = [Poly::ZERO; K_MAX];
    let mut t0 = [Poly::ZERO; K_MAX];
    polyvec::power2round(&t[..k], &mut t1[..k], &mut t0[..k]);

    // pk = rho || t1
    pk[..SEED_BYTES].copy_from_slice(&rho);
    for i in 0..k {
        let off = SEED_BYTES + i * 32 * t1_bw;
        packing::encode(&t1[i], t1_bw, &mut pk[off..off + 32 * t1_bw]);
    }

    let mut tr = [0u8; TR_BYTES];
    hash::shake256(&[&*pk], &mut tr);

    // sk = rho || K || tr || s1 || s2 || t0
    sk[..32].copy_from_slice(&rho);
    sk[32..64].copy_from_slice(&expanded[96..128]);
    sk[64..128].copy_from_slice(&tr);
    let mut off = 128;
    for i in 0..l {
        let mut s = s1[i];
        s.sub_from_x(p.eta);
        packing::encode(&s, eta_bw, &mut sk[off..off + 32 * eta_bw]);
        s.zeroize();
        off += 32 * eta_bw;
    }
    for i in 0..k {
        let mut s = s2[i];
        s.sub_from_x(p.eta);
        packing::encode(&s, eta_bw, &mut sk[off..off + 32 * eta_bw]);
        s.zeroize();
        off += 32 * eta_bw;
    }
    for i in 0..k {
        let mut s = t0[i];
        s.sub_from_x(1 << (D - 1));
        packing::encode(&s, D, &mut sk[off..off + 32 * D]);
        s.zeroize();
        off += 32 * D;
    }

    expanded.zeroize();
    rho_prime.zeroize();
    s1.zeroize();
    s1_hat.zeroize();
    s2.zeroize();
    t.zeroize();
    t0.zeroize();
}

/// Signs msg under a serialized secret key. An all-zero rnd gives the
/// deterministic variant; anything else hedges the mask derivation.
pub(crate) fn sign(
    p: &ParamSet,
    rnd: &[u8; RND_BYTES],
    sk: &[u8],
    msg: &[u8],
    sig: &mut [u8],
) -> Result<(), MlDsaError> {
    debug_assert_eq!(sk.len(), p.seckey_bytes());
    debug_assert_eq!(sig.len(), p.sig_bytes());
    let (k, l) = (p.k, p.l);
    let eta_bw = p.eta_bw();
    let g1_bw = p.gamma1_bw();
    let w1_bw = p.w1_bw();
    let alpha = 2 * p.gamma2;
    let ctb = p.ctilde_bytes();
    let w1_len = k * 32 * w1_bw;

    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&sk[..32]);
    let key = &sk[32..64];
    let tr = &sk[64..128];

    let mut off = 128;
    let mut s1 = [Poly::ZERO; L_MAX];
    for i in 0..l {
        packing::decode(&sk[off..off + 32 * eta_bw], eta_bw, &mut s1[i]);
        s1[i].sub_from_x(p.eta);
        off += 32 * eta_bw;
    }
    let mut s2 = [Poly::ZERO; K_MAX];
    for i in 0..k {
        packing::decode(&sk[off..off + 32 * eta_bw], eta_bw, &mut s2[i]);
        s2[i].sub_from_x(p.eta);
        off += 32 * eta_bw;
    }
    let mut t0 = [Poly::ZERO; K_MAX];
    for i in 0..k {
        packing::decode(&sk[off..off + 32 * D], D, &mut t0[i]);
        t0[i].sub_from_x(1 << (D - 1));
        off += 32 * D;
    }

    let mut a = [[Poly::ZERO; L_MAX]; K_MAX];
    sampling::expand_a(&rho, k, l, &mut a);

    let mut mu = [0u8; MU_BYTES];
    hash::shake256(&[tr, msg], &mut mu);

    let mut rho_pp = [0u8; 64];
    hash::shake256(&[key, rnd.as_slice(), &mu], &mut rho_pp);

    // secrets move to the NTT domain once, up front
    polyvec::ntt(&mut s1[..l]);
    polyvec::ntt(&mut s2[..k]);
    polyvec::ntt(&mut t0[..k]);

    let mut y = [Poly::ZERO; L_MAX];
    let mut y_hat = [Poly::ZERO; L_MAX];
    let mut w = [Poly::ZERO; K_MAX];
    let mut w1 = [Poly::ZERO; K_MAX];
    let mut w1_enc = [0u8; W1_ENC_MAX];
    let mut c_tilde = [0u8; CTILDE_MAX];
    let mut c = Poly::ZERO;
    let mut z = [Poly::ZERO; L_MAX];
    let mut cs2 = [Poly::ZERO; K_MAX];
    let mut r = [Poly::ZERO; K_MAX];
    let mut r0 = [Poly::ZERO; K_MAX];
    let mut ct0 = [Poly::ZERO; K_MAX];
    let mut neg_ct0 = [Poly::ZERO; K_MAX];
    let mut hint_target = [Poly::ZERO; K_MAX];
    let mut h = [Poly::ZERO; K_MAX];

    let mut kappa: u16 = 0;
    let mut signed = false;

    for _ in 0..MAX_SIGN_ATTEMPTS {
        sampling::expand_mask(&rho_pp, kappa, p.gamma1, g1_bw, &mut y[..l]);
        kappa += l as u16;

        // w = A * y
        y_hat = y;
        polyvec::ntt(&mut y_hat[..l]);
        polyvec::matrix_mul(&a, &y_hat[..l], &mut w[..k]);
        polyvec::intt(&mut w[..k]);

        // challenge from mu and the high bits of w
        polyvec::high_bits(&w[..k], &mut w1[..k], alpha);
        for i in 0..k {
            packing::encode(&w1[i], w1_bw, &mut w1_enc[i * 32 * w1_bw..(i + 1) * 32 * w1_bw]);
        }
        hash::shake256(&[&mu, &w1_enc[..w1_len]], &mut c_tilde[..ctb]);
        sampling::sample_in_ball(&c_tilde[..ctb], p.tau, &mut c);
        let mut c_hat = c;
        c_hat.ntt();

        // z = y + c * s1
        polyvec::mul_poly(&c_hat, &s1[..l], &mut z[..l]);
        polyvec::intt(&mut z[..l]);
        polyvec::add_assign(&mut z[..l], &y[..l]);

        // r0 = LowBits(w - c * s2)
        polyvec::mul_poly(&c_hat, &s2[..k], &mut cs2[..k]);
        polyvec::intt(&mut cs2[..k]);
        r = w;
        polyvec::sub_assign(&mut r[..k], &cs2[..k]);
        polyvec::low_bits(&r[..k], &mut r0[..k], alpha);

        // restart whenever z or r0 would leak; only the restart itself
        // is observable
        if polyvec::infinity_norm(&z[..l]) >= p.gamma1 - p.beta
            || polyvec::infinity_norm(&r0[..k]) >= p.gamma2 - p.beta
        {
            continue;
        }

        // h = MakeHint(-c*t0, w - c*s2 + c*t0)
        polyvec::mul_poly(&c_hat, &t0[..k], &mut ct0[..k]);
        polyvec::intt(&mut ct0[..k]);
        neg_ct0 = ct0;
        polyvec::neg(&mut neg_ct0[..k]);
        hint_target = r;
        polyvec::add_assign(&mut hint_target[..k], &ct0[..k]);
        polyvec::make_hint(&neg_ct0[..k], &hint_target[..k], &mut h[..k], alpha);

        if polyvec::infinity_norm(&ct0[..k]) >= p.gamma2 || polyvec::count_ones(&h[..k]) > p.omega
        {
            continue;
        }

        // sig = c_tilde || z || hints
        sig[..ctb].copy_from_slice(&c_tilde[..ctb]);
        polyvec::sub_from_x(&mut z[..l], p.gamma1);
        let mut soff = ctb;
        for i in 0..l {
            packing::encode(&z[i], g1_bw, &mut sig[soff..soff + 32 * g1_bw]);
            soff += 32 * g1_bw;
        }
        packing::encode_hint(&h[..k], p.omega, &mut sig[soff..soff + p.omega + k]);
        signed = true;
        break;
    }

    s1.zeroize();
    s2.zeroize();
    t0.zeroize();
    y.zeroize();
    y_hat.zeroize();
    z.zeroize();
    cs2.zeroize();
    r.zeroize();
    r0.zeroize();
    ct0.zeroize();
    neg_ct0.zeroize();
    hint_target.zeroize();
    c.zeroize();
    rho_pp.zeroize();

    if signed {
        Ok(())
    } else {
        Err(MlDsaError::RejectionLimit)
    }
}

/// Verifies a serialized signature. Malformed encodings, structural hint
/// violations, norm violations and hash mismatch all collapse to false.
pub(crate) fn verify(p: &ParamSet, pk: &[u8], msg: &[u8], sig: &[u8]) -> bool {
    if pk.len() != p.pubkey_bytes() || sig.len() != p.sig_bytes() {
        return false;
    }
    let (k, l) = (p.k, p.l);
    let g1_bw = p.gamma1_bw();
    let w1_bw = p.w1_bw();
    let alpha = 2 * p.gamma2;
    let ctb = p.ctilde_bytes();
    let w1_len = k * 32 * w1_bw;
    let t1_bw = 23 - D;

    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&pk[..32]);
    let mut t1 = [Poly::ZERO; K_MAX];
    for i in 0..k {
        let off = SEED_BYTES + i * 32 * t1_bw;
        packing::decode(&pk[off..off + 32 * t1_bw], t1_bw, &mut t1[i]);
    }

    let c_tilde = &sig[..ctb];
    let mut z = [Poly::ZERO; L_MAX];
    let mut off = ctb;
    for i in 0..l {
        packing::decode(&sig[off..off + 32 * g1_bw], g1_bw, &mut z[i]);
        z[i].sub_from_x(p.gamma1);
        off += 32 * g1_bw;
    }
    let mut h = [Poly::ZERO; K_MAX];
    if !packing::decode_hint(&sig[off..], k, p.omega, &mut h[..k]) {
        return false;
    }
    if polyvec::infinity_norm(&z[..l]) >= p.gamma1 - p.beta {
        return false;
    }

    let mut a = [[Poly::ZERO; L_MAX]; K_MAX];
    sampling::expand_a(&rho, k, l, &mut a);

    let mut tr = [0u8; TR_BYTES];
    hash::shake256(&[pk], &mut tr);
    let mut mu = [0u8; MU_BYTES];
    hash::shake256(&[&tr, msg], &mut mu);

    let mut c = Poly::ZERO;
    sampling::sample_in_ball(c_tilde, p.tau, &mut c);
    c.ntt();

    // w' = A*z - c * t1*2^d, all in the NTT domain
    polyvec::ntt(&mut z[..l]);
    let mut w = [Poly::ZERO; K_MAX];
    polyvec::matrix_mul(&a, &z[..l], &mut w[..k]);
    polyvec::shift_left(&mut t1[..k], D);
    polyvec::ntt(&mut t1[..k]);
    let mut ct1 = [Poly::ZERO; K_MAX];
    polyvec::mul_poly(&c, &t1[..k], &mut ct1[..k]);
    polyvec::sub_assign(&mut w[..k], &ct1[..k]);
    polyvec::intt(&mut w[..k]);

    let mut w1 = [Poly::ZERO; K_MAX];
    polyvec::use_hint(&h[..k], &w[..k], &mut w1[..k], alpha);

    let mut w1_enc = [0u8; W1_ENC_MAX];
    for i in 0..k {
        packing::encode(&w1[i], w1_bw, &mut w1_enc[i * 32 * w1_bw..(i + 1) * 32 * w1_bw]);
    }
    let mut c_tilde2 = [0u8; CTILDE_MAX];
    hash::shake256(&[&mu, &w1_enc[..w1_len]], &mut c_tilde2[..ctb]);

    c_tilde2[..ctb].ct_eq(c_tilde).into()
}
