//! ContentResolver backed by an IPFS Kubo node's RPC API.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dendrite_core::ContentId;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ResolveError, Result};
use crate::traits::ContentResolver;

/// Configuration for [`KuboResolver`].
#[derive(Debug, Clone)]
pub struct KuboConfig {
    /// Base URL of the Kubo RPC API.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for KuboConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5001".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Fetches blocks and nodes over `/api/v0/block/get` and `/api/v0/dag/get`.
#[derive(Debug, Clone)]
pub struct KuboResolver {
    client: Client,
    config: KuboConfig,
}

impl KuboResolver {
    pub fn new(config: KuboConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Use an existing HTTP client; its own timeout settings apply.
    pub fn with_client(client: Client, config: KuboConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &KuboConfig {
        &self.config
    }

    fn url(&self, command: &str) -> String {
        format!(
            "{}/api/v0/{command}",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    async fn call(&self, command: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.url(command);
        trace!(%url, ?query, "kubo rpc call");

        let response = self.client.post(&url).query(query).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, %body, "kubo rpc call failed");
        Err(classify_failure(&body, query))
    }
}

#[async_trait]
impl ContentResolver for KuboResolver {
    async fn block(&self, cid: &ContentId) -> Result<Bytes> {
        let arg = cid.to_string();
        let response = self.call("block/get", &[("arg", arg.as_str())]).await?;
        Ok(response.bytes().await?)
    }

    async fn node(&self, cid: &ContentId, path: Option<&str>) -> Result<Value> {
        let arg = dag_arg(cid, path);
        let response = self
            .call("dag/get", &[("arg", arg.as_str()), ("output-codec", "dag-json")])
            .await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ResolveError::Decode(e.to_string()))
    }
}

/// `<cid><path>`, with the path normalized to a single leading slash.
fn dag_arg(cid: &ContentId, path: Option<&str>) -> String {
    match path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(path) => format!("{cid}/{path}"),
        None => cid.to_string(),
    }
}

/// Map a Kubo error body onto a resolve error.
///
/// Kubo reports errors as `{"Message": ..., "Code": ..., "Type": "error"}`.
fn classify_failure(body: &str, query: &[(&str, &str)]) -> ResolveError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("Message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned());
    let arg = query
        .iter()
        .find(|(key, _)| *key == "arg")
        .map(|(_, value)| *value)
        .unwrap_or_default();

    if message.contains("no link named") || message.contains("could not resolve through") {
        let (cid, path) = arg.split_once('/').unwrap_or((arg, ""));
        ResolveError::PathNotFound {
            cid: cid.to_owned(),
            path: format!("/{path}"),
        }
    } else if message.contains("not found") {
        ResolveError::NotFound(arg.to_owned())
    } else {
        ResolveError::Transport(message)
    }
}
