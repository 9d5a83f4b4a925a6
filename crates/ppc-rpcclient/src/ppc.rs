// ppc-rpcclient/src/ppc.rs

//! Proof-of-stake calls.
//!
//! Each `*_async` method returns a [`FutureResult`] without waiting; the
//! method of the same name without the suffix sends and waits.

use crate::results::{self, KernelStakeModifierResult, NextRequiredTargetResult};
use crate::{Client, Command, FutureResult, RpcResult};
use ppc_crypto::ShaHash;
use ppc_wire::MsgTx;

impl Client {
    /// Stake modifier of the given block, or of the best block when no hash
    /// is given.
    pub fn get_kernel_stake_modifier_async(&self, block_hash: Option<&ShaHash>) -> FutureResult<u64> {
        self.send_cmd(
            Ok(Command::get_kernel_stake_modifier(block_hash, false)),
            results::decode_stake_modifier,
        )
    }

    /// See [`Client::get_kernel_stake_modifier_verbose`] for the block hash
    /// alongside the modifier.
    pub async fn get_kernel_stake_modifier(&self, block_hash: Option<&ShaHash>) -> RpcResult<u64> {
        self.get_kernel_stake_modifier_async(block_hash).receive().await
    }

    pub fn get_kernel_stake_modifier_verbose_async(
        &self,
        block_hash: Option<&ShaHash>,
    ) -> FutureResult<KernelStakeModifierResult> {
        self.send_cmd(
            Ok(Command::get_kernel_stake_modifier(block_hash, true)),
            results::decode_kernel_stake_modifier_verbose,
        )
    }

    pub async fn get_kernel_stake_modifier_verbose(
        &self,
        block_hash: Option<&ShaHash>,
    ) -> RpcResult<KernelStakeModifierResult> {
        self.get_kernel_stake_modifier_verbose_async(block_hash)
            .receive()
            .await
    }

    /// Compact difficulty target the next proof-of-stake or proof-of-work
    /// block must meet
    pub fn get_next_required_target_async(&self, proof_of_stake: bool) -> FutureResult<u32> {
        self.send_cmd(
            Ok(Command::get_next_required_target(proof_of_stake, false)),
            results::decode_next_required_target,
        )
    }

    pub async fn get_next_required_target(&self, proof_of_stake: bool) -> RpcResult<u32> {
        self.get_next_required_target_async(proof_of_stake)
            .receive()
            .await
    }

    pub fn get_next_required_target_verbose_async(
        &self,
        proof_of_stake: bool,
    ) -> FutureResult<NextRequiredTargetResult> {
        self.send_cmd(
            Ok(Command::get_next_required_target(proof_of_stake, true)),
            results::decode_next_required_target_verbose,
        )
    }

    pub async fn get_next_required_target_verbose(
        &self,
        proof_of_stake: bool,
    ) -> RpcResult<NextRequiredTargetResult> {
        self.get_next_required_target_verbose_async(proof_of_stake)
            .receive()
            .await
    }

    /// Subsidy of the most recent proof-of-work block
    pub fn get_last_proof_of_work_reward_async(&self) -> FutureResult<i64> {
        self.send_cmd(
            Ok(Command::get_last_proof_of_work_reward()),
            results::decode_last_proof_of_work_reward,
        )
    }

    pub async fn get_last_proof_of_work_reward(&self) -> RpcResult<i64> {
        self.get_last_proof_of_work_reward_async().receive().await
    }

    /// Submit a signed coin-stake transaction; resolves to its id.
    ///
    /// `None` fails with `InvalidParameter` without contacting the node.
    pub fn send_coin_stake_transaction_async(&self, tx: Option<&MsgTx>) -> FutureResult<ShaHash> {
        self.send_cmd(
            Command::send_coin_stake_transaction(tx),
            results::decode_coin_stake_hash,
        )
    }

    pub async fn send_coin_stake_transaction(&self, tx: Option<&MsgTx>) -> RpcResult<ShaHash> {
        self.send_coin_stake_transaction_async(tx).receive().await
    }
}
