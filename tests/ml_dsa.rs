//! End-to-end sign/verify flows across the three parameter sets:
//! correctness, determinism, hedging, and rejection of tampered inputs.

use ml_dsa_native::rng::DeterministicRng;
use ml_dsa_native::{ml_dsa_44, ml_dsa_65, ml_dsa_87};
use rand_core::RngCore;

const ZERO_SEED: [u8; 32] = [0u8; 32];
const ZERO_RND: [u8; 32] = [0u8; 32];

fn counting_message(len: usize) -> Vec<u8> {
    (1..=len as u8).collect()
}

#[test]
fn level44_single_byte_message_round_trip() {
    let (pk, sk) = ml_dsa_44::keygen(&ZERO_SEED);
    let msg = counting_message(1);
    let sig = ml_dsa_44::sign(&ZERO_RND, &sk, &msg).unwrap();
    assert!(ml_dsa_44::verify(&pk, &msg, &sig));

    // deterministic variant: same inputs, same bytes
    let sig2 = ml_dsa_44::sign(&ZERO_RND, &sk, &msg).unwrap();
    assert_eq!(sig.to_bytes().as_slice(), sig2.to_bytes().as_slice());
}

#[test]
fn level65_round_trip() {
    let (pk, sk) = ml_dsa_65::keygen(&ZERO_SEED);
    let msg = counting_message(32);
    let sig = ml_dsa_65::sign(&ZERO_RND, &sk, &msg).unwrap();
    assert!(ml_dsa_65::verify(&pk, &msg, &sig));
}

#[test]
fn level87_empty_message_round_trip() {
    let (pk, sk) = ml_dsa_87::keygen(&ZERO_SEED);
    let sig = ml_dsa_87::sign(&ZERO_RND, &sk, b"").unwrap();
    assert!(ml_dsa_87::verify(&pk, b"", &sig));
}

#[test]
fn tampered_signature_rejected() {
    let (pk, sk) = ml_dsa_44::keygen(&ZERO_SEED);
    let msg = counting_message(1);
    let sig = ml_dsa_44::sign(&ZERO_RND, &sk, &msg).unwrap();

    let mut bytes = sig.to_bytes();
    bytes[0] ^= 1;
    let bad = ml_dsa_44::Signature::from_bytes(&bytes).unwrap();
    assert!(!ml_dsa_44::verify(&pk, &msg, &bad));
}

#[test]
fn tampered_public_key_rejected() {
    let (pk, sk) = ml_dsa_44::keygen(&ZERO_SEED);
    let msg = counting_message(1);
    let sig = ml_dsa_44::sign(&ZERO_RND, &sk, &msg).unwrap();

    let mut bytes = pk.to_bytes();
    bytes[40] ^= 1 << 3;
    let bad = ml_dsa_44::PublicKey::from_bytes(&bytes).unwrap();
    assert!(!ml_dsa_44::verify(&bad, &msg, &sig));
}

#[test]
fn hedged_signatures_differ_and_both_verify() {
    let (pk, sk) = ml_dsa_44::keygen(&ZERO_SEED);
    let msg = b"hedged signing";

    let mut rnd1 = [0u8; 32];
    let mut rnd2 = [0u8; 32];
    rnd1[0] = 1;
    rnd2[0] = 2;

    let sig1 = ml_dsa_44::sign(&rnd1, &sk, msg).unwrap();
    let sig2 = ml_dsa_44::sign(&rnd2, &sk, msg).unwrap();
    assert!(ml_dsa_44::verify(&pk, msg, &sig1));
    assert!(ml_dsa_44::verify(&pk, msg, &sig2));
    assert_ne!(sig1.to_bytes().as_slice(), sig2.to_bytes().as_slice());
}

#[test]
fn keygen_is_deterministic_in_the_seed() {
    let mut rng = DeterministicRng::from_seed(b"keygen-determinism");
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);

    let (pk1, sk1) = ml_dsa_65::keygen(&seed);
    let (pk2, sk2) = ml_dsa_65::keygen(&seed);
    assert_eq!(pk1.to_bytes().as_slice(), pk2.to_bytes().as_slice());
    assert_eq!(sk1.to_bytes().as_slice(), sk2.to_bytes().as_slice());
}

// The original interop suite: random keypair, random message, then a random
// bit flip in each of signature, public key and message must break
// verification, across message lengths 1..33.
macro_rules! bit_flip_matrix {
    ($name:ident, $level:ident) => {
        #[test]
        fn $name() {
            let mut rng = DeterministicRng::from_seed(stringify!($name).as_bytes());
            for mlen in 1usize..33 {
                let mut seed = [0u8; 32];
                rng.fill_bytes(&mut seed);
                let mut rnd = [0u8; 32];
                rng.fill_bytes(&mut rnd);
                let mut msg = vec![0u8; mlen];
                rng.fill_bytes(&mut msg);

                let (pk, sk) = $level::keygen(&seed);
                let sig = $level::sign(&rnd, &sk, &msg).unwrap();
                assert!($level::verify(&pk, &msg, &sig));

                let mut sig_bytes = sig.to_bytes();
                let bit = rng.next_u32() as usize % (sig_bytes.len() * 8);
                sig_bytes[bit / 8] ^= 1 << (bit % 8);
                let bad_sig = $level::Signature::from_bytes(&sig_bytes).unwrap();
                assert!(!$level::verify(&pk, &msg, &bad_sig));

                let mut pk_bytes = pk.to_bytes();
                let bit = rng.next_u32() as usize % (pk_bytes.len() * 8);
                pk_bytes[bit / 8] ^= 1 << (bit % 8);
                let bad_pk = $level::PublicKey::from_bytes(&pk_bytes).unwrap();
                assert!(!$level::verify(&bad_pk, &msg, &sig));

                let mut bad_msg = msg.clone();
                let bit = rng.next_u32() as usize % (bad_msg.len() * 8);
                bad_msg[bit / 8] ^= 1 << (bit % 8);
                assert!(!$level::verify(&pk, &bad_msg, &sig));
            }
        }
    };
}

bit_flip_matrix!(level44_bit_flip_matrix, ml_dsa_44);
bit_flip_matrix!(level65_bit_flip_matrix, ml_dsa_65);
bit_flip_matrix!(level87_bit_flip_matrix, ml_dsa_87);

#[test]
fn from_bytes_rejects_wrong_lengths() {
    use ml_dsa_native::MlDsaError;

    assert_eq!(
        ml_dsa_44::PublicKey::from_bytes(&[0u8; 7]).unwrap_err(),
        MlDsaError::InvalidKeyLength
    );
    assert_eq!(
        ml_dsa_44::SecretKey::from_bytes(&[0u8; ml_dsa_44::SECKEY_BYTES + 1]).unwrap_err(),
        MlDsaError::InvalidKeyLength
    );
    assert_eq!(
        ml_dsa_44::Signature::from_bytes(&[0u8; ml_dsa_44::SIG_BYTES - 1]).unwrap_err(),
        MlDsaError::InvalidSignatureLength
    );
}

#[test]
fn serialized_lengths_are_pinned() {
    assert_eq!(ml_dsa_44::PUBKEY_BYTES, 1312);
    assert_eq!(ml_dsa_44::SECKEY_BYTES, 2560);
    assert_eq!(ml_dsa_44::SIG_BYTES, 2420);
    assert_eq!(ml_dsa_65::PUBKEY_BYTES, 1952);
    assert_eq!(ml_dsa_65::SECKEY_BYTES, 4032);
    assert_eq!(ml_dsa_65::SIG_BYTES, 3309);
    assert_eq!(ml_dsa_87::PUBKEY_BYTES, 2592);
    assert_eq!(ml_dsa_87::SECKEY_BYTES, 4896);
    assert_eq!(ml_dsa_87::SIG_BYTES, 4627);
}

#[test]
fn signatures_survive_byte_round_trip() {
    let (pk, sk) = ml_dsa_44::keygen(&ZERO_SEED);
    let msg = b"serialization round trip";
    let sig = ml_dsa_44::sign(&ZERO_RND, &sk, msg).unwrap();

    let pk2 = ml_dsa_44::PublicKey::from_bytes(pk.as_ref()).unwrap();
    let sig2 = ml_dsa_44::Signature::from_bytes(sig.as_ref()).unwrap();
    let sk2 = ml_dsa_44::SecretKey::from_bytes(sk.as_bytes()).unwrap();
    assert!(ml_dsa_44::verify(&pk2, msg, &sig2));

    // a key parsed back from bytes signs identically
    let sig3 = ml_dsa_44::sign(&ZERO_RND, &sk2, msg).unwrap();
    assert_eq!(sig.to_bytes().as_slice(), sig3.to_bytes().as_slice());
}
