//! # Dendrite
//!
//! Resolve SEP-001 multimedia metadata from content-addressed storage.
//!
//! ## Overview
//!
//! Given a content identifier, Dendrite:
//!
//! - **Selects a decoder** from the identifier's encoding tag (`0x55` compact,
//!   `0x85` dag-jose)
//! - **Verifies the envelope** against the key embedded in its own header
//! - **Resolves the claims** `s`, `d` and `t`
//! - **Fingerprints the signer** with an RFC 7638 thumbprint in hex
//! - **Validates the document** against the SEP-001 schema
//!
//! Only a document that passes every step is returned.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dendrite::Dendrite;
//! use dendrite::resolver::{KuboConfig, KuboResolver};
//!
//! async fn example() {
//!     let resolver = KuboResolver::new(KuboConfig::default()).unwrap();
//!     let dendrite = Dendrite::new(resolver);
//!
//!     let sep001 = dendrite
//!         .resolve("bafkreifphflffiwa2ocqy4skadu6whhqiv2ax2rfqzcysj65uzplfbv6za")
//!         .await
//!         .unwrap();
//!
//!     println!("{}: {}", sep001.typ(), sep001.metadata().d.title);
//!     let fingerprint = "aba44a9673c452de6183c82919de2cdb8b830615e9ac684841502ba7173ee00a";
//!     assert!(sep001.validate(fingerprint));
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `dendrite::core` - Identifiers, claims, envelopes, schema
//! - `dendrite::resolver` - Content resolver trait and implementations

pub mod decoder;
pub mod dendrite;
pub mod error;
pub mod registry;

// Re-export component crates
pub use dendrite_core as core;
pub use dendrite_resolver as resolver;

pub use crate::dendrite::{Dendrite, DendriteConfig, Sep001};
pub use decoder::{CompactDecoder, Decoded, Decoder, LinkedDecoder};
pub use error::{DendriteError, Result};
pub use registry::{lookup, Codec, DecoderConstructor};

pub use dendrite_core::{
    Algorithm, ContentId, Descriptive, EmbeddedKeyVerifier, Fingerprint, Header, JwsVerifier,
    Payload, SchemaValidator, StandardDocument, Structural, Technical,
};
pub use dendrite_resolver::{
    ContentResolver, KuboConfig, KuboResolver, MemoryResolver, ResolveError,
};
