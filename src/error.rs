use thiserror::Error;

/// Errors surfaced at the engine boundary. Verification failure is not an
/// error; `verify` reports it as a plain `false`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MlDsaError {
    #[error("invalid key length")]
    InvalidKeyLength,
    #[error("invalid signature length")]
    InvalidSignatureLength,
    #[error("signing gave up after too many rejected attempts")]
    RejectionLimit,
}
