// ppc-rpcclient/src/results.rs

//! Decoders from raw JSON replies to typed results.
//!
//! The node has shipped both string-encoded and numeric integers over time,
//! so every integer accepts either form. Which decoder applies is fixed by
//! the verbose flag the command was built with.

use crate::DecodeError;
use ppc_crypto::ShaHash;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Verbose reply of `getkernelstakemodifier`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelStakeModifierResult {
    pub hash: ShaHash,
    #[serde(rename = "kernelstakemodifier", deserialize_with = "de_u64")]
    pub kernel_stake_modifier: u64,
}

/// Verbose reply of `getnextrequiredtarget`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRequiredTargetResult {
    #[serde(deserialize_with = "de_target")]
    pub target: u32,
    /// Absent from some node versions; read as proof-of-work
    #[serde(rename = "proofofstake", default)]
    pub proof_of_stake: bool,
}

/// Reply of `getlastproofofworkreward`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastProofOfWorkRewardResult {
    #[serde(deserialize_with = "de_i64")]
    pub subsidy: i64,
}

pub fn decode_stake_modifier(value: Value) -> Result<u64, DecodeError> {
    parse_u64(&value)
}

/// Targets are compact 32-bit values; anything wider is rejected rather
/// than truncated.
pub fn decode_next_required_target(value: Value) -> Result<u32, DecodeError> {
    narrow_target(parse_u64(&value)?)
}

pub fn decode_kernel_stake_modifier_verbose(
    value: Value,
) -> Result<KernelStakeModifierResult, DecodeError> {
    Ok(serde_json::from_value(value)?)
}

pub fn decode_next_required_target_verbose(
    value: Value,
) -> Result<NextRequiredTargetResult, DecodeError> {
    Ok(serde_json::from_value(value)?)
}

pub fn decode_last_proof_of_work_reward(value: Value) -> Result<i64, DecodeError> {
    let result: LastProofOfWorkRewardResult = serde_json::from_value(value)?;
    Ok(result.subsidy)
}

pub fn decode_coin_stake_hash(value: Value) -> Result<ShaHash, DecodeError> {
    match value {
        Value::String(s) => Ok(s.parse()?),
        other => Err(DecodeError::UnexpectedShape {
            expected: "hash string",
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_u64(value: &Value) -> Result<u64, DecodeError> {
    match value {
        Value::String(s) => parse_u64_str(s),
        Value::Number(n) => n.as_u64().ok_or_else(|| DecodeError::InvalidInteger {
            value: n.to_string(),
            reason: "not an unsigned 64-bit integer".into(),
        }),
        other => Err(DecodeError::UnexpectedShape {
            expected: "integer or decimal string",
            found: json_kind(other),
        }),
    }
}

// Plain decimal digits only: no sign, no whitespace.
fn parse_u64_str(s: &str) -> Result<u64, DecodeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidInteger {
            value: s.to_string(),
            reason: "not a decimal number".into(),
        });
    }
    s.parse().map_err(|e: std::num::ParseIntError| DecodeError::InvalidInteger {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

fn parse_i64_str(s: &str) -> Result<i64, DecodeError> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidInteger {
            value: s.to_string(),
            reason: "not a decimal number".into(),
        });
    }
    s.parse().map_err(|e: std::num::ParseIntError| DecodeError::InvalidInteger {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

fn narrow_target(value: u64) -> Result<u32, DecodeError> {
    u32::try_from(value).map_err(|_| DecodeError::TargetOverflow(value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Unsigned {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Signed {
    Number(i64),
    Text(String),
}

fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Unsigned::deserialize(deserializer)? {
        Unsigned::Number(n) => Ok(n),
        Unsigned::Text(s) => parse_u64_str(&s).map_err(serde::de::Error::custom),
    }
}

fn de_target<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    narrow_target(de_u64(deserializer)?).map_err(serde::de::Error::custom)
}

fn de_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Signed::deserialize(deserializer)? {
        Signed::Number(n) => Ok(n),
        Signed::Text(s) => parse_i64_str(&s).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const HASH: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";

    #[test]
    fn test_stake_modifier_string_and_number() {
        assert_eq!(decode_stake_modifier(json!("12345")).unwrap(), 12345);
        assert_eq!(decode_stake_modifier(json!(12345)).unwrap(), 12345);
        assert_eq!(
            decode_stake_modifier(json!("18446744073709551615")).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_stake_modifier_rejects_bad_input() {
        for bad in [json!("18446744073709551616"), json!("12a"), json!(""), json!("+5"), json!(" 5")] {
            assert!(
                matches!(decode_stake_modifier(bad.clone()), Err(DecodeError::InvalidInteger { .. })),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(
            decode_stake_modifier(json!(-1)),
            Err(DecodeError::InvalidInteger { .. })
        ));
        assert!(matches!(
            decode_stake_modifier(json!(1.5)),
            Err(DecodeError::InvalidInteger { .. })
        ));
        assert!(matches!(
            decode_stake_modifier(Value::Null),
            Err(DecodeError::UnexpectedShape { found: "null", .. })
        ));
    }

    #[test]
    fn test_target_truncation_boundary() {
        assert_eq!(
            decode_next_required_target(json!("4294967295")).unwrap(),
            4294967295
        );
        // One past u32::MAX would have truncated to 0; it is an error instead.
        assert!(matches!(
            decode_next_required_target(json!("4294967296")),
            Err(DecodeError::TargetOverflow(4294967296))
        ));
        assert!(matches!(
            decode_next_required_target(json!(u64::MAX)),
            Err(DecodeError::TargetOverflow(u64::MAX))
        ));
    }

    #[test]
    fn test_verbose_decoders_need_objects() {
        let ksm = decode_kernel_stake_modifier_verbose(json!({
            "hash": HASH,
            "kernelstakemodifier": "9876543210",
        }))
        .unwrap();
        assert_eq!(ksm.hash.to_string(), HASH);
        assert_eq!(ksm.kernel_stake_modifier, 9876543210);

        let ksm = decode_kernel_stake_modifier_verbose(json!({
            "hash": HASH,
            "kernelstakemodifier": 42,
        }))
        .unwrap();
        assert_eq!(ksm.kernel_stake_modifier, 42);

        assert!(matches!(
            decode_kernel_stake_modifier_verbose(json!("9876543210")),
            Err(DecodeError::Json(_))
        ));

        let target = decode_next_required_target_verbose(json!({
            "target": "486604799",
            "proofofstake": true,
        }))
        .unwrap();
        assert_eq!(
            target,
            NextRequiredTargetResult {
                target: 0x1d00ffff,
                proof_of_stake: true,
            }
        );
        assert!(matches!(
            decode_next_required_target_verbose(json!(486604799)),
            Err(DecodeError::Json(_))
        ));
        let target = decode_next_required_target_verbose(json!({ "target": 470286007 })).unwrap();
        assert_eq!(target.target, 470286007);
        assert!(!target.proof_of_stake);
        assert!(decode_next_required_target_verbose(json!({ "proofofstake": true })).is_err());

        assert!(decode_next_required_target_verbose(json!({
            "target": "4294967296",
            "proofofstake": false,
        }))
        .is_err());
    }

    #[test]
    fn test_scalar_decoders_reject_objects() {
        let object = json!({ "hash": HASH, "kernelstakemodifier": "1" });
        assert!(matches!(
            decode_stake_modifier(object.clone()),
            Err(DecodeError::UnexpectedShape { found: "object", .. })
        ));
        assert!(matches!(
            decode_next_required_target(object),
            Err(DecodeError::UnexpectedShape { found: "object", .. })
        ));
    }

    #[test]
    fn test_last_proof_of_work_reward() {
        assert_eq!(
            decode_last_proof_of_work_reward(json!({ "subsidy": 1_234_567 })).unwrap(),
            1_234_567
        );
        assert_eq!(
            decode_last_proof_of_work_reward(json!({ "subsidy": "-20" })).unwrap(),
            -20
        );
        assert!(decode_last_proof_of_work_reward(json!({ "reward": 5 })).is_err());
        assert!(decode_last_proof_of_work_reward(json!(5)).is_err());
    }

    #[test]
    fn test_coin_stake_hash() {
        let hash = decode_coin_stake_hash(json!(HASH)).unwrap();
        assert_eq!(hash.to_string(), HASH);
        assert_eq!(hash.as_bytes()[0], 0x90);
        assert_eq!(hash.as_bytes()[31], 0xa1);

        assert!(matches!(
            decode_coin_stake_hash(json!(&HASH[1..])),
            Err(DecodeError::InvalidHash(_))
        ));
        assert!(matches!(
            decode_coin_stake_hash(json!(HASH.replace('a', "x"))),
            Err(DecodeError::InvalidHash(_))
        ));
        assert!(matches!(
            decode_coin_stake_hash(json!(7)),
            Err(DecodeError::UnexpectedShape { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_stake_modifier_decimal(n in any::<u64>()) {
            prop_assert_eq!(decode_stake_modifier(json!(n.to_string())).unwrap(), n);
        }

        #[test]
        fn prop_target_decimal(n in any::<u32>()) {
            prop_assert_eq!(decode_next_required_target(json!(n.to_string())).unwrap(), n);
        }

        #[test]
        fn prop_target_overflow(n in (u32::MAX as u64 + 1)..=u64::MAX) {
            let is_overflow = matches!(
                decode_next_required_target(json!(n.to_string())),
                Err(DecodeError::TargetOverflow(v)) if v == n
            );
            prop_assert!(is_overflow);
        }
    }
}
