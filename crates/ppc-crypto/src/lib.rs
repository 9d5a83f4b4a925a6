// ppc-crypto/src/lib.rs

//! Hash primitives for the proof-of-stake RPC client
//!
//! This crate provides:
//! - The 32-byte `ShaHash` identifier with its reversed-hex string form
//! - Double SHA-256, as used for transaction ids

pub mod hash;

pub use hash::{double_sha256, ShaHash, HASH_SIZE, MAX_HASH_STRING_SIZE};

/// Result type for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid hash length: expected 32 bytes, got {0}")]
    InvalidHashLength(usize),

    #[error("Invalid hash string length: expected 64 characters, got {0}")]
    InvalidHashStringLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
