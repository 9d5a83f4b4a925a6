// ppc-rpcclient/src/client.rs
use crate::future::Decoder;
use crate::{Command, ConnConfig, Dispatch, FutureResult, HttpTransport, RpcResult};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Handle to a node's RPC interface.
///
/// Cloning is cheap; clones share the dispatcher and the request id counter.
#[derive(Clone)]
pub struct Client {
    dispatcher: Arc<dyn Dispatch>,
    next_id: Arc<AtomicU64>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("dispatcher", &"<dyn Dispatch>")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

impl Client {
    pub fn new(dispatcher: Arc<dyn Dispatch>) -> Self {
        Self {
            dispatcher,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Client that talks JSON-RPC over HTTP to the node in `config`
    pub fn connect_http(config: &ConnConfig) -> RpcResult<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::info!(uri = %transport.uri(), "using HTTP RPC transport");
        Ok(Self::new(Arc::new(transport)))
    }

    /// Allocate the next request id
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send a command without waiting for the reply.
    ///
    /// A command that could not be built comes back as an already failed
    /// handle and nothing is sent. Must be called from within a tokio
    /// runtime.
    pub fn send_cmd<T>(&self, cmd: RpcResult<Command>, decode: Decoder<T>) -> FutureResult<T> {
        let cmd = match cmd {
            Ok(cmd) => cmd,
            Err(err) => {
                tracing::debug!(error = %err, "command rejected before dispatch");
                return FutureResult::failed(err, decode);
            }
        };

        let method = cmd.method();
        let verbose = cmd.is_verbose();
        let id = self.next_id();
        let request = cmd.into_request(id);
        let dispatcher = Arc::clone(&self.dispatcher);
        let (tx, rx) = oneshot::channel();

        tracing::debug!(method, id, verbose, "dispatching command");
        tokio::spawn(async move {
            let reply = dispatcher.dispatch(request).await;
            if let Err(e) = &reply {
                tracing::warn!(method, id, error = %e, "RPC call failed");
            }
            // The caller may have dropped its handle.
            let _ = tx.send(reply);
        });

        FutureResult::pending(method, rx, decode)
    }
}
