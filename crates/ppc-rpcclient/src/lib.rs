// ppc-rpcclient/src/lib.rs

//! Client bindings for the proof-of-stake JSON-RPC calls of a Peercoin-family
//! node.
//!
//! Every call comes in two forms. The `*_async` form builds the command,
//! hands it to the dispatcher and returns a [`FutureResult`] straight away.
//! The plain form awaits that handle and decodes the reply.
//!
//! ```no_run
//! # async fn run() -> Result<(), ppc_rpcclient::RpcClientError> {
//! use ppc_rpcclient::{Client, ConnConfig};
//!
//! let client = Client::connect_http(&ConnConfig::default())?;
//! let pending = client.get_next_required_target_async(true);
//! let modifier = client.get_kernel_stake_modifier(None).await?;
//! let target = pending.await?;
//! println!("{modifier} {target:#x}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod future;
pub mod ppc;
pub mod results;
pub mod transport;
pub mod types;

#[cfg(test)]
mod mock;

pub use client::Client;
pub use commands::Command;
pub use config::ConnConfig;
pub use future::FutureResult;
pub use results::{KernelStakeModifierResult, LastProofOfWorkRewardResult, NextRequiredTargetResult};
pub use transport::{Dispatch, HttpTransport};
pub use types::*;

pub use ppc_crypto::ShaHash;
pub use ppc_wire::MsgTx;

/// Failure of the dispatcher to deliver a reply
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to build HTTP request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },
    #[error("Response channel closed before a reply arrived")]
    ChannelClosed,
}

/// Failure to turn a delivered reply into the requested type
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Unexpected response shape: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected {expected}, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid integer {value:?}: {reason}")]
    InvalidInteger { value: String, reason: String },
    #[error("Target {0} does not fit in 32 bits")]
    TargetOverflow(u64),
    #[error("Invalid hash: {0}")]
    InvalidHash(#[from] ppc_crypto::CryptoError),
}

#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl RpcClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcClientError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, RpcClientError::Decode(_))
    }

    /// JSON-RPC error code, when the node answered with an error object
    pub fn rpc_code(&self) -> Option<i32> {
        match self {
            RpcClientError::Transport(TransportError::Rpc { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

pub type RpcResult<T> = Result<T, RpcClientError>;
