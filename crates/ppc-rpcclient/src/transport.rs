// ppc-rpcclient/src/transport.rs
use crate::{ConnConfig, RpcRequest, RpcResponse, TransportError};
use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Method, Request, Uri};
use serde_json::Value;
use std::time::Duration;

/// Sends a request to the node and returns the raw `result` of the reply.
///
/// Implementations own everything about the connection. A JSON-RPC error
/// object in the reply is a failure of the call and must come back as
/// [`TransportError::Rpc`].
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, request: RpcRequest) -> Result<Value, TransportError>;
}

/// JSON-RPC over plain HTTP POST
pub struct HttpTransport {
    client: hyper::Client<HttpConnector>,
    uri: Uri,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ConnConfig) -> Result<Self, TransportError> {
        let uri = config.uri()?;
        if config.request_timeout_secs == 0 {
            return Err(TransportError::InvalidEndpoint(format!(
                "{}: request timeout must be at least one second",
                config.host
            )));
        }
        Ok(Self {
            client: hyper::Client::new(),
            uri,
            timeout: config.request_timeout(),
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    async fn post(&self, body: Vec<u8>) -> Result<(u16, hyper::body::Bytes), TransportError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))?;

        let response = self.client.request(request).await?;
        let status = response.status().as_u16();
        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        Ok((status, bytes))
    }
}

#[async_trait]
impl Dispatch for HttpTransport {
    async fn dispatch(&self, request: RpcRequest) -> Result<Value, TransportError> {
        let body = serde_json::to_vec(&request).map_err(TransportError::Encode)?;

        let (status, bytes) = tokio::time::timeout(self.timeout, self.post(body))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;

        // Nodes report RPC errors with a 500 status and a JSON body, so the
        // body is read before the status is judged.
        let success = (200..300).contains(&status);
        let status_error = || TransportError::Status {
            status,
            body: String::from_utf8_lossy(&bytes).trim().to_string(),
        };
        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !success => return Err(status_error()),
            Err(e) => return Err(TransportError::MalformedResponse(e)),
        };
        let is_envelope = body.get("result").is_some() || body.get("error").is_some();
        let response: RpcResponse = match serde_json::from_value(body) {
            Ok(response) => response,
            Err(_) if !success => return Err(status_error()),
            Err(e) => return Err(TransportError::MalformedResponse(e)),
        };

        if let Some(error) = response.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        if !success {
            return Err(status_error());
        }
        if !is_envelope {
            return Err(TransportError::MalformedResponse(
                serde::de::Error::missing_field("result"),
            ));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
