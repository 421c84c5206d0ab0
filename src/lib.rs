//! Pure Rust ML-DSA signature core (NIST FIPS 204, the standardized form
//! of CRYSTALS-Dilithium).
//!
//! Implements keygen, sign and verify for the three named parameter sets
//! ML-DSA-44, ML-DSA-65 and ML-DSA-87, one module per level. The engine is
//! deterministic from its inputs: callers supply the 32-byte keygen seed
//! and the 32-byte signing randomness (all zeros for deterministic
//! signatures), so test vectors reproduce bit-for-bit.
//!
//! # Quick start
//! ```rust
//! use ml_dsa_native::ml_dsa_44;
//! use ml_dsa_native::rng::os_seed;
//!
//! let seed = os_seed();
//! let (pk, sk) = ml_dsa_44::keygen(&seed);
//! let rnd = [0u8; 32]; // deterministic signing
//! let sig = ml_dsa_44::sign(&rnd, &sk, b"hello").unwrap();
//! assert!(ml_dsa_44::verify(&pk, b"hello", &sig));
//! ```
//!
//! # Security notes
//! - Secret keys and all secret-bearing scratch buffers zeroize on drop.
//! - Scalar code on secret data is constant-time; rejection sampling only
//!   branches on public XOF output.
//! - Keys and signatures are opaque fixed-size byte arrays; the engine
//!   holds no global state, so concurrent calls on disjoint buffers are
//!   safe.

pub mod error;
pub mod field;
mod hash;
pub mod keys;
pub mod ml_dsa_44;
pub mod ml_dsa_65;
pub mod ml_dsa_87;
pub mod ntt;
pub mod packing;
pub mod params;
pub mod poly;
pub mod polyvec;
pub mod rng;
pub mod sampling;
mod scheme;

pub use error::MlDsaError;
pub use rng::DeterministicRng;
