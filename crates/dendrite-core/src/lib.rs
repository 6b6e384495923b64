//! # Dendrite Core
//!
//! Pure primitives for resolving SEP-001 multimedia metadata: content
//! identifiers, claims, JOSE envelopes, signer fingerprints and the SEP-001
//! schema.
//!
//! This crate contains no I/O and no networking. Fetching blocks and nodes is
//! the job of `dendrite-resolver`; orchestration lives in `dendrite`.
//!
//! ## Key Types
//!
//! - [`ContentId`] - Self-describing content identifier (CID)
//! - [`Claims`] - The `s`, `d` and `t` claims in any state of resolution
//! - [`CompactJws`] / [`GeneralJws`] - The two signed envelope forms
//! - [`Fingerprint`] - RFC 7638 thumbprint of the signer's key
//! - [`SchemaValidator`] - Structural check against the SEP-001 schema
//!
//! ## Verification
//!
//! Envelopes are only ever verified against the key embedded in their own
//! protected header. See the [`jose`] module.

pub mod claims;
pub mod crypto;
pub mod error;
pub mod jose;
pub mod jwk;
pub mod schema;
pub mod standard;
pub mod types;

pub use claims::{
    validate_claims, Claims, ClaimsReferences, Descriptive, Payload, RawClaims, Structural,
    Technical, CLAIM_KEYS,
};
pub use crypto::{Algorithm, EmbeddedKeyVerifier, JwsVerifier};
pub use error::{CoreError, JoseError, ValidationError};
pub use jose::{CompactJws, GeneralJws, JwsSignature, VerifiedHeader};
pub use jwk::{Fingerprint, Jwk};
pub use schema::{ObjectSchema, SchemaValidator, SchemaViolation, SEP001_SCHEMA};
pub use standard::{Header, RawDocument, StandardDocument};
pub use types::{ContentId, DAG_CBOR_CODE, DAG_JOSE_CODE, RAW_CODE};
