//! # Dendrite Resolver
//!
//! Content retrieval for SEP-001 resolution. Decoders fetch raw blocks and
//! structured nodes through the [`ContentResolver`] trait and never talk to
//! storage directly.
//!
//! ## Key Types
//!
//! - [`ContentResolver`] - The async trait for block and node retrieval
//! - [`MemoryResolver`] - In-memory resolver for tests and fixtures
//! - [`KuboResolver`] - IPFS Kubo RPC resolver
//! - [`ResolveError`] - Failures surfaced unchanged to callers
//!
//! ## Design Notes
//!
//! - **Path selectors**: `node` takes an optional `/`-separated path and
//!   follows IPLD links along it.
//! - **No retries**: timeouts and retry policy belong to the implementation,
//!   not to the decoders that call it.

pub mod error;
pub mod kubo;
pub mod memory;
pub mod traits;

pub use error::{ResolveError, Result};
pub use kubo::{KuboConfig, KuboResolver};
pub use memory::MemoryResolver;
pub use traits::ContentResolver;
