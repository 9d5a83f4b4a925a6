// ppc-wire/src/transaction.rs

use crate::encode::{
    put_var_bytes, put_var_int, read_u32, read_u64, read_var_bytes, read_var_int, var_int_size,
    MAX_MESSAGE_PAYLOAD,
};
use crate::{WireError, WireResult};
use ppc_crypto::{double_sha256, ShaHash, HASH_SIZE};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Current transaction version
pub const TX_VERSION: i32 = 1;

/// Sequence number that disables lock time for an input
pub const MAX_TX_IN_SEQUENCE_NUM: u32 = 0xffff_ffff;

/// Output index marking a null previous outpoint
pub const NULL_OUT_POINT_INDEX: u32 = 0xffff_ffff;

// version + time + lock time
const BASE_TX_SIZE: usize = 4 + 4 + 4;

// hash + index + sequence
const MIN_TX_IN_PAYLOAD: u64 = HASH_SIZE as u64 + 4 + 4 + 1;

// value + script length
const MIN_TX_OUT_PAYLOAD: u64 = 8 + 1;

const MAX_TX_IN_PER_MESSAGE: u64 = MAX_MESSAGE_PAYLOAD / MIN_TX_IN_PAYLOAD + 1;
const MAX_TX_OUT_PER_MESSAGE: u64 = MAX_MESSAGE_PAYLOAD / MIN_TX_OUT_PAYLOAD + 1;

// counts come from untrusted input
const PREALLOC_LIMIT: u64 = 256;

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: ShaHash,
    pub index: u32,
}

impl OutPoint {
    pub fn new(hash: ShaHash, index: u32) -> Self {
        Self { hash, index }
    }

    /// The outpoint a coinbase input spends
    pub fn null() -> Self {
        Self {
            hash: ShaHash::zero(),
            index: NULL_OUT_POINT_INDEX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.index == NULL_OUT_POINT_INDEX && self.hash.is_zero()
    }
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub previous_out_point: OutPoint,
    #[serde(with = "hex::serde")]
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

impl TxIn {
    pub fn new(previous_out_point: OutPoint, signature_script: Vec<u8>) -> Self {
        Self {
            previous_out_point,
            signature_script,
            sequence: MAX_TX_IN_SEQUENCE_NUM,
        }
    }

    fn serialize_size(&self) -> usize {
        HASH_SIZE + 4 + var_int_size(self.signature_script.len() as u64) + self.signature_script.len() + 4
    }
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: i64,
    #[serde(with = "hex::serde")]
    pub pk_script: Vec<u8>,
}

impl TxOut {
    pub fn new(value: i64, pk_script: Vec<u8>) -> Self {
        Self { value, pk_script }
    }

    /// An output with no value and no script, as the first output of a
    /// coin-stake transaction
    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.pk_script.is_empty()
    }

    fn serialize_size(&self) -> usize {
        8 + var_int_size(self.pk_script.len() as u64) + self.pk_script.len()
    }
}

/// Timestamped transaction as carried on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTx {
    pub version: i32,
    /// Transaction timestamp in Unix epoch seconds
    pub time: u32,
    pub tx_in: Vec<TxIn>,
    pub tx_out: Vec<TxOut>,
    pub lock_time: u32,
}

impl MsgTx {
    /// Create an empty transaction with the given timestamp
    pub fn new(time: u32) -> Self {
        Self {
            version: TX_VERSION,
            time,
            tx_in: Vec::new(),
            tx_out: Vec::new(),
            lock_time: 0,
        }
    }

    pub fn add_tx_in(&mut self, tx_in: TxIn) {
        self.tx_in.push(tx_in);
    }

    pub fn add_tx_out(&mut self, tx_out: TxOut) {
        self.tx_out.push(tx_out);
    }

    pub fn is_coin_base(&self) -> bool {
        self.tx_in.len() == 1 && self.tx_in[0].previous_out_point.is_null()
    }

    /// A coin-stake spends at least one real output and leaves its first
    /// output empty
    pub fn is_coin_stake(&self) -> bool {
        !self.tx_in.is_empty()
            && !self.tx_in[0].previous_out_point.is_null()
            && self.tx_out.len() >= 2
            && self.tx_out[0].is_empty()
    }

    /// Number of bytes `serialize` produces
    pub fn serialize_size(&self) -> usize {
        BASE_TX_SIZE
            + var_int_size(self.tx_in.len() as u64)
            + self.tx_in.iter().map(TxIn::serialize_size).sum::<usize>()
            + var_int_size(self.tx_out.len() as u64)
            + self.tx_out.iter().map(TxOut::serialize_size).sum::<usize>()
    }

    /// Canonical binary encoding
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.serialize_size());

        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.time.to_le_bytes());

        put_var_int(&mut buf, self.tx_in.len() as u64);
        for input in &self.tx_in {
            buf.extend_from_slice(input.previous_out_point.hash.as_bytes());
            buf.extend_from_slice(&input.previous_out_point.index.to_le_bytes());
            put_var_bytes(&mut buf, &input.signature_script);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        put_var_int(&mut buf, self.tx_out.len() as u64);
        for output in &self.tx_out {
            buf.extend_from_slice(&output.value.to_le_bytes());
            put_var_bytes(&mut buf, &output.pk_script);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Decode one transaction from a reader
    pub fn decode<R: Read>(r: &mut R) -> WireResult<Self> {
        let version = read_u32(r)? as i32;
        let time = read_u32(r)?;

        let count = read_var_int(r)?;
        if count > MAX_TX_IN_PER_MESSAGE {
            return Err(WireError::TooLarge {
                field: "tx_in",
                count,
                max: MAX_TX_IN_PER_MESSAGE,
            });
        }
        let mut tx_in = Vec::with_capacity(count.min(PREALLOC_LIMIT) as usize);
        for _ in 0..count {
            let mut hash = [0u8; HASH_SIZE];
            r.read_exact(&mut hash)?;
            let index = read_u32(r)?;
            let signature_script = read_var_bytes(r, MAX_MESSAGE_PAYLOAD, "signature_script")?;
            let sequence = read_u32(r)?;
            tx_in.push(TxIn {
                previous_out_point: OutPoint::new(ShaHash::new(hash), index),
                signature_script,
                sequence,
            });
        }

        let count = read_var_int(r)?;
        if count > MAX_TX_OUT_PER_MESSAGE {
            return Err(WireError::TooLarge {
                field: "tx_out",
                count,
                max: MAX_TX_OUT_PER_MESSAGE,
            });
        }
        let mut tx_out = Vec::with_capacity(count.min(PREALLOC_LIMIT) as usize);
        for _ in 0..count {
            let value = read_u64(r)? as i64;
            let pk_script = read_var_bytes(r, MAX_MESSAGE_PAYLOAD, "pk_script")?;
            tx_out.push(TxOut { value, pk_script });
        }

        let lock_time = read_u32(r)?;

        Ok(Self {
            version,
            time,
            tx_in,
            tx_out,
            lock_time,
        })
    }

    /// Decode a transaction that must span the whole of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> WireResult<Self> {
        let mut reader = bytes;
        let tx = Self::decode(&mut reader)?;
        if !reader.is_empty() {
            return Err(WireError::TrailingBytes(reader.len()));
        }
        Ok(tx)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex(s: &str) -> WireResult<Self> {
        let bytes = hex::decode(s.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Transaction id: double SHA-256 of the canonical encoding
    pub fn tx_sha(&self) -> ShaHash {
        double_sha256(&self.serialize())
    }
}
