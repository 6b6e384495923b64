//! In-memory implementation of the ContentResolver trait.
//!
//! Used by tests and fixtures. Blocks and nodes live in two maps; path
//! selectors are walked the same way a Kubo node walks them, following IPLD
//! links into other stored nodes.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dendrite_core::{ContentId, RAW_CODE};
use serde_json::Value;
use tracing::trace;

use crate::error::{ResolveError, Result};
use crate::traits::ContentResolver;

/// In-memory content resolver.
///
/// Thread-safe via RwLock. Every fetch is recorded so tests can assert on
/// what was (and was not) retrieved.
pub struct MemoryResolver {
    inner: RwLock<MemoryResolverInner>,
    latency: Option<Duration>,
}

#[derive(Default)]
struct MemoryResolverInner {
    blocks: HashMap<ContentId, Bytes>,
    nodes: HashMap<ContentId, Value>,

    /// Identifiers whose fetches fail with a transport error.
    failures: HashMap<ContentId, String>,

    /// Every identifier fetched, in order.
    fetched: Vec<ContentId>,
}

impl MemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryResolverInner::default()),
            latency: None,
        }
    }

    /// Delay every fetch by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Store raw bytes under their raw-codec CIDv1.
    pub fn insert_block(&self, data: impl Into<Bytes>) -> ContentId {
        let data = data.into();
        let cid = ContentId::for_data(RAW_CODE, &data);
        self.write().blocks.insert(cid, data);
        cid
    }

    /// Store a node under a CIDv1 with the given codec, hashed over its JSON text.
    pub fn insert_node(&self, codec: u64, node: Value) -> ContentId {
        let cid = ContentId::for_data(codec, node.to_string().as_bytes());
        self.write().nodes.insert(cid, node);
        cid
    }

    /// Store raw bytes under a fixed identifier.
    pub fn put_block(&self, cid: ContentId, data: impl Into<Bytes>) {
        self.write().blocks.insert(cid, data.into());
    }

    /// Store a node under a fixed identifier.
    pub fn put_node(&self, cid: ContentId, node: Value) {
        self.write().nodes.insert(cid, node);
    }

    /// Make every later fetch of `cid` fail with a transport error.
    pub fn fail(&self, cid: ContentId, message: impl Into<String>) {
        self.write().failures.insert(cid, message.into());
    }

    /// Identifiers fetched so far, in order.
    pub fn fetched(&self) -> Vec<ContentId> {
        self.read().fetched.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryResolverInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryResolverInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Record the fetch and surface an injected failure, if any.
    fn begin_fetch(&self, cid: &ContentId) -> Result<()> {
        let mut inner = self.write();
        inner.fetched.push(*cid);
        match inner.failures.get(cid) {
            Some(message) => Err(ResolveError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentResolver for MemoryResolver {
    async fn block(&self, cid: &ContentId) -> Result<Bytes> {
        trace!(%cid, "memory block fetch");
        self.delay().await;
        self.begin_fetch(cid)?;

        self.read()
            .blocks
            .get(cid)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(cid.to_string()))
    }

    async fn node(&self, cid: &ContentId, path: Option<&str>) -> Result<Value> {
        trace!(%cid, path, "memory node fetch");
        self.delay().await;
        self.begin_fetch(cid)?;

        let inner = self.read();
        let root = inner
            .nodes
            .get(cid)
            .ok_or_else(|| ResolveError::NotFound(cid.to_string()))?;

        let not_found = || ResolveError::PathNotFound {
            cid: cid.to_string(),
            path: path.unwrap_or_default().to_owned(),
        };

        let mut current = root;
        for segment in path.unwrap_or_default().split('/').filter(|s| !s.is_empty()) {
            current = inner.follow(current)?;
            current = match current {
                Value::Object(object) => object.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(not_found)?;
        }

        Ok(inner.follow(current)?.clone())
    }
}

/// Links followed from one value before the chain is treated as a cycle.
const MAX_LINK_HOPS: usize = 64;

impl MemoryResolverInner {
    /// Dereference `value` while it is an IPLD link to a stored node.
    fn follow<'a>(&'a self, mut value: &'a Value) -> Result<&'a Value> {
        let mut hops = 0;
        while let Some(target) = as_link(value) {
            hops += 1;
            if hops > MAX_LINK_HOPS {
                return Err(ResolveError::Decode(format!(
                    "link chain through {target} exceeds {MAX_LINK_HOPS} hops"
                )));
            }
            let cid = ContentId::parse(target)
                .map_err(|e| ResolveError::Decode(e.to_string()))?;
            value = self
                .nodes
                .get(&cid)
                .ok_or_else(|| ResolveError::NotFound(cid.to_string()))?;
        }
        Ok(value)
    }
}

/// The target of a `{"/": "<cid>"}` link, if `value` is one.
fn as_link(value: &Value) -> Option<&str> {
    value
        .as_object()
        .filter(|object| object.len() == 1)
        .and_then(|object| object.get("/"))
        .and_then(Value::as_str)
}
