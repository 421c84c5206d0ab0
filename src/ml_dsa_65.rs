//! ML-DSA-65: k = 6, l = 5, eta = 4 (security category 3).

use crate::error::MlDsaError;
use crate::params::{ML_DSA_65, RND_BYTES, SEED_BYTES};
use crate::scheme;
use zeroize::Zeroize;

pub const PUBKEY_BYTES: usize = ML_DSA_65.pubkey_bytes();
pub const SECKEY_BYTES: usize = ML_DSA_65.seckey_bytes();
pub const SIG_BYTES: usize = ML_DSA_65.sig_bytes();

pub type PublicKey = crate::keys::PublicKey<PUBKEY_BYTES>;
pub type SecretKey = crate::keys::SecretKey<SECKEY_BYTES>;
pub type Signature = crate::keys::Signature<SIG_BYTES>;

/// Deterministically derives a keypair from a 32-byte seed.
pub fn keygen(seed: &[u8; SEED_BYTES]) -> (PublicKey, SecretKey) {
    let mut pk = [0u8; PUBKEY_BYTES];
    let mut sk = [0u8; SECKEY_BYTES];
    scheme::keygen(&ML_DSA_65, seed, &mut pk, &mut sk);
    let keys = (PublicKey::new(pk), SecretKey::new(sk));
    sk.zeroize();
    keys
}

/// Signs a message; all-zero rnd means deterministic signing.
pub fn sign(rnd: &[u8; RND_BYTES], sk: &SecretKey, msg: &[u8]) -> Result<Signature, MlDsaError> {
    let mut sig = [0u8; SIG_BYTES];
    scheme::sign(&ML_DSA_65, rnd, sk.as_bytes(), msg, &mut sig)?;
    Ok(Signature::new(sig))
}

/// Verifies a signature over a message under a public key.
pub fn verify(pk: &PublicKey, msg: &[u8], sig: &Signature) -> bool {
    scheme::verify(&ML_DSA_65, pk.as_bytes(), msg, sig.as_bytes())
}
