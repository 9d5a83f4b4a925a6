// ppc-wire/src/lib.rs

//! Wire encoding for proof-of-stake chain messages
//!
//! This crate provides:
//! - CompactSize variable length integers
//! - The timestamped transaction (`MsgTx`) and its canonical encoding

pub mod encode;
pub mod transaction;

pub use encode::{put_var_int, read_var_int, var_int_size, write_var_int};
pub use transaction::{MsgTx, OutPoint, TxIn, TxOut, TX_VERSION};

/// Result type for wire operations
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while encoding or decoding wire messages
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Non-canonical varint: {0} was not encoded in its shortest form")]
    NonCanonicalVarInt(u64),

    #[error("{field} too large: {count} exceeds maximum of {max}")]
    TooLarge {
        field: &'static str,
        count: u64,
        max: u64,
    },

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
