//! Fixed-size byte wrappers for public keys, secret keys and signatures.
//!
//! Public keys and signatures compare in constant time; secret keys zeroize
//! on drop and never show their contents through Debug.

use crate::error::MlDsaError;
use core::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// A serialized ML-DSA public key of SIZE bytes.
#[derive(Clone)]
pub struct PublicKey<const SIZE: usize>(pub(crate) [u8; SIZE]);

impl<const SIZE: usize> PublicKey<SIZE> {
    pub(crate) fn new(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; SIZE] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }

    /// Validates the length of an untrusted byte string.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MlDsaError> {
        if bytes.len() != SIZE {
            return Err(MlDsaError::InvalidKeyLength);
        }
        let mut arr = [0u8; SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const SIZE: usize> AsRef<[u8]> for PublicKey<SIZE> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const SIZE: usize> ConstantTimeEq for PublicKey<SIZE> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_ref().ct_eq(other.0.as_ref())
    }
}

impl<const SIZE: usize> PartialEq for PublicKey<SIZE> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const SIZE: usize> Eq for PublicKey<SIZE> {}

impl<const SIZE: usize> fmt::Debug for PublicKey<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

/// A serialized ML-DSA secret key of SIZE bytes; zeroizes on drop.
#[derive(Clone)]
pub struct SecretKey<const SIZE: usize>(pub(crate) [u8; SIZE]);

impl<const SIZE: usize> SecretKey<SIZE> {
    pub(crate) fn new(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; SIZE] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MlDsaError> {
        if bytes.len() != SIZE {
            return Err(MlDsaError::InvalidKeyLength);
        }
        let mut arr = [0u8; SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl<const SIZE: usize> Zeroize for SecretKey<SIZE> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<const SIZE: usize> Drop for SecretKey<SIZE> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const SIZE: usize> fmt::Debug for SecretKey<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes redacted>)", SIZE)
    }
}

/// A serialized ML-DSA signature of SIZE bytes.
#[derive(Clone)]
pub struct Signature<const SIZE: usize>(pub(crate) [u8; SIZE]);

impl<const SIZE: usize> Signature<SIZE> {
    pub(crate) fn new(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; SIZE] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MlDsaError> {
        if bytes.len() != SIZE {
            return Err(MlDsaError::InvalidSignatureLength);
        }
        let mut arr = [0u8; SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const SIZE: usize> AsRef<[u8]> for Signature<SIZE> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const SIZE: usize> ConstantTimeEq for Signature<SIZE> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_ref().ct_eq(other.0.as_ref())
    }
}

impl<const SIZE: usize> PartialEq for Signature<SIZE> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const SIZE: usize> Eq for Signature<SIZE> {}

impl<const SIZE: usize> fmt::Debug for Signature<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}
