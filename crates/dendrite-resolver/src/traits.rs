//! ContentResolver trait: the abstract interface for content retrieval.
//!
//! Decoders never fetch anything themselves; they go through this trait so
//! the storage layer can be a local map, an IPFS node or anything else.

use async_trait::async_trait;
use bytes::Bytes;
use dendrite_core::ContentId;
use serde_json::Value;

use crate::error::Result;

/// Async interface for retrieving content-addressed data.
///
/// Implementations are shared across concurrent decodes and may be called
/// reentrantly. Timeouts and retries, if any, belong here and not to callers.
#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// Fetch the raw bytes of a block.
    async fn block(&self, cid: &ContentId) -> Result<Bytes>;

    /// Fetch a structured node, optionally descending along `path`.
    ///
    /// The path is a `/`-separated selector such as `/link` or `/a/0/b`.
    /// IPLD links met along the way are followed.
    async fn node(&self, cid: &ContentId, path: Option<&str>) -> Result<Value>;
}

#[async_trait]
impl<R: ContentResolver + ?Sized> ContentResolver for std::sync::Arc<R> {
    async fn block(&self, cid: &ContentId) -> Result<Bytes> {
        (**self).block(cid).await
    }

    async fn node(&self, cid: &ContentId, path: Option<&str>) -> Result<Value> {
        (**self).node(cid, path).await
    }
}
