// ppc-rpcclient/src/mock.rs
use crate::{Dispatch, RpcRequest, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Canned {
    delay: Duration,
    reply: Result<Value, TransportError>,
}

/// Dispatcher that records every request and answers from canned replies,
/// keyed by method.
#[derive(Default)]
pub(crate) struct MockDispatch {
    replies: Mutex<HashMap<String, VecDeque<Canned>>>,
    requests: Mutex<Vec<RpcRequest>>,
}

impl MockDispatch {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, method: &str, reply: Result<Value, TransportError>) {
        self.reply_after(method, Duration::ZERO, reply);
    }

    pub(crate) fn reply_after(
        &self,
        method: &str,
        delay: Duration,
        reply: Result<Value, TransportError>,
    ) {
        self.replies
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(Canned { delay, reply });
    }

    pub(crate) fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatch for MockDispatch {
    async fn dispatch(&self, request: RpcRequest) -> Result<Value, TransportError> {
        let canned = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&request.method)
            .and_then(VecDeque::pop_front);
        self.requests.lock().unwrap().push(request);

        match canned {
            Some(Canned { delay, reply }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                reply
            }
            None => Err(TransportError::Rpc {
                code: -32601,
                message: "Method not found".into(),
            }),
        }
    }
}
