//! # Dendrite Testkit
//!
//! Testing utilities for Dendrite.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Real SEP-001 envelopes with their expected outcomes
//! - **Generators**: Proptest strategies for claims and payloads
//! - **Fixtures**: A signer plus an in-memory resolver to store envelopes in
//!
//! ## Golden Vectors
//!
//! ```rust
//! use dendrite_testkit::vectors::{all_vectors, golden_resolver};
//!
//! let resolver = golden_resolver();
//! for vector in all_vectors() {
//!     println!("{}: {}", vector.name, vector.cid);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use dendrite_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let cid = fixture.store_compact();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{eddsa_compact, multi_party_fixtures, sample_metadata, TestFixture, MEDIA_TYPE};
pub use generators::{metadata, MetadataParams};
pub use vectors::{all_vectors, golden_resolver, Expected, GoldenVector};
