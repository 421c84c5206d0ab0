//! ML-DSA-44: k = 4, l = 4, eta = 2 (security category 2).

use crate::error::MlDsaError;
use crate::params::{ML_DSA_44, RND_BYTES, SEED_BYTES};
use crate::scheme;
use zeroize::Zeroize;

/// Serialized public-key bytes.
pub const PUBKEY_BYTES: usize = ML_DSA_44.pubkey_bytes();
/// Serialized secret-key bytes.
pub const SECKEY_BYTES: usize = ML_DSA_44.seckey_bytes();
/// Serialized signature bytes.
pub const SIG_BYTES: usize = ML_DSA_44.sig_bytes();

pub type PublicKey = crate::keys::PublicKey<PUBKEY_BYTES>;
pub type SecretKey = crate::keys::SecretKey<SECKEY_BYTES>;
pub type Signature = crate::keys::Signature<SIG_BYTES>;

/// Deterministically derives a keypair from a 32-byte seed.
pub fn keygen(seed: &[u8; SEED_BYTES]) -> (PublicKey, SecretKey) {
    let mut pk = [0u8; PUBKEY_BYTES];
    let mut sk = [0u8; SECKEY_BYTES];
    scheme::keygen(&ML_DSA_44, seed, &mut pk, &mut sk);
    let keys = (PublicKey::new(pk), SecretKey::new(sk));
    sk.zeroize();
    keys
}

/// Signs a message. An all-zero rnd selects deterministic signing; fresh
/// randomness selects the hedged variant.
pub fn sign(rnd: &[u8; RND_BYTES], sk: &SecretKey, msg: &[u8]) -> Result<Signature, MlDsaError> {
    let mut sig = [0u8; SIG_BYTES];
    scheme::sign(&ML_DSA_44, rnd, sk.as_bytes(), msg, &mut sig)?;
    Ok(Signature::new(sig))
}

/// Verifies a signature over a message under a public key.
pub fn verify(pk: &PublicKey, msg: &[u8], sig: &Signature) -> bool {
    scheme::verify(&ML_DSA_44, pk.as_bytes(), msg, sig.as_bytes())
}
