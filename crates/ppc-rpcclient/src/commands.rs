// ppc-rpcclient/src/commands.rs
use crate::{RpcClientError, RpcRequest, RpcResult};
use ppc_crypto::ShaHash;
use ppc_wire::MsgTx;
use serde_json::{json, Value};

pub const GET_KERNEL_STAKE_MODIFIER: &str = "getkernelstakemodifier";
pub const GET_NEXT_REQUIRED_TARGET: &str = "getnextrequiredtarget";
pub const GET_LAST_PROOF_OF_WORK_REWARD: &str = "getlastproofofworkreward";
pub const SEND_COIN_STAKE_TRANSACTION: &str = "sendcoinstaketransaction";

/// A proof-of-stake RPC call and its parameters, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetKernelStakeModifier {
        /// Reversed-hex block hash, empty when no block was given
        block_hash: String,
        verbose: bool,
    },
    GetNextRequiredTarget {
        proof_of_stake: bool,
        verbose: bool,
    },
    GetLastProofOfWorkReward,
    SendCoinStakeTransaction {
        hex_tx: String,
    },
}

impl Command {
    /// An absent hash is sent as the empty string, which the node reads as
    /// "no block".
    pub fn get_kernel_stake_modifier(block_hash: Option<&ShaHash>, verbose: bool) -> Self {
        Command::GetKernelStakeModifier {
            block_hash: block_hash.map(ShaHash::to_string).unwrap_or_default(),
            verbose,
        }
    }

    pub fn get_next_required_target(proof_of_stake: bool, verbose: bool) -> Self {
        Command::GetNextRequiredTarget {
            proof_of_stake,
            verbose,
        }
    }

    pub fn get_last_proof_of_work_reward() -> Self {
        Command::GetLastProofOfWorkReward
    }

    /// Fails before anything is sent when no transaction is given.
    pub fn send_coin_stake_transaction(tx: Option<&MsgTx>) -> RpcResult<Self> {
        let tx = tx.ok_or_else(|| {
            RpcClientError::InvalidParameter("no coin-stake transaction to send".into())
        })?;
        Ok(Command::SendCoinStakeTransaction {
            hex_tx: tx.to_hex(),
        })
    }

    pub fn method(&self) -> &'static str {
        match self {
            Command::GetKernelStakeModifier { .. } => GET_KERNEL_STAKE_MODIFIER,
            Command::GetNextRequiredTarget { .. } => GET_NEXT_REQUIRED_TARGET,
            Command::GetLastProofOfWorkReward => GET_LAST_PROOF_OF_WORK_REWARD,
            Command::SendCoinStakeTransaction { .. } => SEND_COIN_STAKE_TRANSACTION,
        }
    }

    /// Positional parameters in the order the node expects them
    pub fn params(&self) -> Vec<Value> {
        match self {
            Command::GetKernelStakeModifier {
                block_hash,
                verbose,
            } => vec![json!(block_hash), json!(verbose)],
            Command::GetNextRequiredTarget {
                proof_of_stake,
                verbose,
            } => vec![json!(proof_of_stake), json!(verbose)],
            Command::GetLastProofOfWorkReward => vec![],
            Command::SendCoinStakeTransaction { hex_tx } => vec![json!(hex_tx)],
        }
    }

    pub fn is_verbose(&self) -> bool {
        match self {
            Command::GetKernelStakeModifier { verbose, .. }
            | Command::GetNextRequiredTarget { verbose, .. } => *verbose,
            Command::GetLastProofOfWorkReward | Command::SendCoinStakeTransaction { .. } => false,
        }
    }

    pub fn into_request(self, id: u64) -> RpcRequest {
        RpcRequest::new(id, self.method(), self.params())
    }
}
