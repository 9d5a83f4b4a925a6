// ppc-crypto/src/hash.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::{CryptoError, CryptoResult};

/// Hash output size in bytes
pub const HASH_SIZE: usize = 32;

/// Length of the hex string form of a hash
pub const MAX_HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash, stored in wire order.
///
/// The string form reverses the bytes before hex encoding, which is how
/// nodes print block and transaction ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaHash([u8; HASH_SIZE]);

impl ShaHash {
    /// Create a new hash from bytes in wire order
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a hash from a wire-order slice (returns error if wrong length)
    pub fn from_slice(slice: &[u8]) -> CryptoResult<Self> {
        if slice.len() != HASH_SIZE {
            return Err(CryptoError::InvalidHashLength(slice.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Get the hash as a byte slice, in wire order
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the hash as a fixed-size array, in wire order
    pub fn to_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    pub fn zero() -> Self {
        Self([0u8; HASH_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }

    /// Hex of the bytes in wire order, without reversal
    pub fn to_wire_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the reversed-hex string form.
    ///
    /// Exactly 64 hex characters are accepted; shorter strings are not
    /// zero-padded.
    pub fn from_reversed_hex(s: &str) -> CryptoResult<Self> {
        if s.len() != MAX_HASH_STRING_SIZE {
            return Err(CryptoError::InvalidHashStringLength(s.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl fmt::Debug for ShaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShaHash({})", self)
    }
}

impl fmt::Display for ShaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for ShaHash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reversed_hex(s)
    }
}

impl Default for ShaHash {
    fn default() -> Self {
        Self::zero()
    }
}

impl AsRef<[u8]> for ShaHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for ShaHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShaHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// SHA-256 applied twice, the transaction and block id hash
pub fn double_sha256(data: &[u8]) -> ShaHash {
    let first = Sha256::digest(data);
    ShaHash::new(Sha256::digest(first).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "0000000032fe677166d54963b62a4677d8957e87c508eaa4fd7eb1c880cd27e3";

    #[test]
    fn test_string_form_is_reversed() {
        let hash: ShaHash = GENESIS.parse().unwrap();
        assert_eq!(hash.as_bytes()[0], 0xe3);
        assert_eq!(hash.as_bytes()[31], 0x00);
        assert_eq!(hash.to_string(), GENESIS);
        assert_eq!(
            hash.to_wire_hex(),
            "e327cd80c8b17efda4ea08c5877e95d877462ab66349d5667167fe3200000000"
        );
    }

    #[test]
    fn test_rejects_bad_strings() {
        assert_eq!(
            ShaHash::from_str("abc"),
            Err(CryptoError::InvalidHashStringLength(3))
        );
        let odd = &GENESIS[..63];
        assert!(matches!(
            odd.parse::<ShaHash>(),
            Err(CryptoError::InvalidHashStringLength(63))
        ));
        let not_hex = GENESIS.replace('f', "z");
        assert!(matches!(
            not_hex.parse::<ShaHash>(),
            Err(CryptoError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_from_slice() {
        assert!(ShaHash::from_slice(&[1u8; 31]).is_err());
        let hash = ShaHash::from_slice(&[7u8; 32]).unwrap();
        assert_eq!(hash.to_bytes(), [7u8; 32]);
    }

    #[test]
    fn test_double_sha256() {
        // sha256d of the empty string
        let hash = double_sha256(b"");
        assert_eq!(
            hash.to_wire_hex(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        assert_ne!(double_sha256(b"a"), hash);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let hash: ShaHash = GENESIS.parse().unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", GENESIS));
        let back: ShaHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    proptest::proptest! {
        #[test]
        fn prop_string_round_trip(bytes in proptest::array::uniform32(proptest::num::u8::ANY)) {
            let hash = ShaHash::new(bytes);
            let parsed: ShaHash = hash.to_string().parse().unwrap();
            proptest::prop_assert_eq!(parsed, hash);
        }
    }
}
