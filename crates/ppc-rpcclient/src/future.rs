// ppc-rpcclient/src/future.rs
use crate::{DecodeError, RpcClientError, RpcResult, TransportError};
use futures::future::BoxFuture;
use serde_json::Value;
use std::future::IntoFuture;
use tokio::sync::oneshot;

/// Turns a delivered reply into the caller's type
pub type Decoder<T> = fn(Value) -> Result<T, DecodeError>;

/// Outcome the dispatch task sends back
pub(crate) type Reply = Result<Value, TransportError>;

enum State {
    Pending {
        method: &'static str,
        rx: oneshot::Receiver<Reply>,
    },
    Failed(RpcClientError),
}

/// Handle to one in-flight RPC call.
///
/// The handle resolves once, when the dispatcher answers. `receive` consumes
/// it, so a reply can't be read twice. A handle that failed before anything
/// was sent holds that error and never touches the dispatcher.
#[must_use = "a FutureResult does nothing unless received"]
pub struct FutureResult<T> {
    state: State,
    decode: Decoder<T>,
}

impl<T> FutureResult<T> {
    pub(crate) fn pending(
        method: &'static str,
        rx: oneshot::Receiver<Reply>,
        decode: Decoder<T>,
    ) -> Self {
        Self {
            state: State::Pending { method, rx },
            decode,
        }
    }

    pub(crate) fn failed(err: RpcClientError, decode: Decoder<T>) -> Self {
        Self {
            state: State::Failed(err),
            decode,
        }
    }

    /// Wait for the reply and decode it.
    ///
    /// Transport failures are returned as they are; the decoder only runs on
    /// a reply that actually arrived.
    pub async fn receive(self) -> RpcResult<T> {
        let (method, rx) = match self.state {
            State::Pending { method, rx } => (method, rx),
            State::Failed(err) => return Err(err),
        };

        let value = rx
            .await
            .map_err(|_| TransportError::ChannelClosed)??;
        tracing::trace!(method, reply = %value, "received reply");

        (self.decode)(value).map_err(|e| {
            tracing::debug!(method, error = %e, "failed to decode reply");
            RpcClientError::Decode(e)
        })
    }
}

impl<T: Send + 'static> IntoFuture for FutureResult<T> {
    type Output = RpcResult<T>;
    type IntoFuture = BoxFuture<'static, RpcResult<T>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.receive())
    }
}
