// ppc-rpcclient/src/config.rs
use crate::TransportError;
use hyper::Uri;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default RPC port of a Peercoin node
pub const DEFAULT_RPC_PORT: u16 = 9902;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnConfig {
    /// `host:port` of the node's RPC server
    pub host: String,
    /// Path requests are posted to
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for ConnConfig {
    fn default() -> Self {
        Self {
            host: format!("127.0.0.1:{}", DEFAULT_RPC_PORT),
            endpoint: "/".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ConnConfig {
    pub fn uri(&self) -> Result<Uri, TransportError> {
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("http://{}/{}", self.host, endpoint)
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| {
                TransportError::InvalidEndpoint(format!("{}: {}", self.host, e))
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
