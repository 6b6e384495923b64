//! Decoders for the two SEP-001 wire encodings.
//!
//! Both share one shape: fetch the envelope, verify it against its embedded
//! key, obtain the claims, fingerprint the signer. They differ only in how
//! the envelope and the claims are fetched.

mod compact;
mod linked;

pub use compact::CompactDecoder;
pub use linked::LinkedDecoder;

use async_trait::async_trait;
use dendrite_core::{ContentId, Fingerprint, JoseError, RawClaims, RawDocument, VerifiedHeader};
use serde_json::Value;

use crate::error::{DendriteError, Result};
use crate::registry::Codec;

/// A verified document whose claims are resolved but not yet schema-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub standard: RawDocument,
    pub fingerprint: Fingerprint,
}

/// Decodes one wire encoding into a [`Decoded`] document.
#[async_trait]
pub trait Decoder: Send + Sync {
    /// The encoding this decoder handles.
    fn codec(&self) -> Codec;

    async fn decode(&self, cid: &ContentId) -> Result<Decoded>;
}

/// Map a verification failure to `InvalidHeader`, logging it.
fn rejected(codec: Codec, cid: &ContentId, error: JoseError) -> DendriteError {
    tracing::warn!(%cid, %codec, %error, "envelope failed verification");
    DendriteError::InvalidHeader(error)
}

/// Parse claim or payload bytes as JSON.
fn parse_json(bytes: &[u8], what: &str) -> Result<Value> {
    serde_json::from_slice(bytes)
        .map_err(|e| DendriteError::InvalidPayload(format!("{what} is not valid JSON: {e}")))
}

/// Fingerprint the verified key and assemble the decoded document.
fn finish(
    codec: Codec,
    cid: &ContentId,
    header: VerifiedHeader,
    claims: RawClaims,
) -> Result<Decoded> {
    let fingerprint = Fingerprint::of(header.jwk())?;
    tracing::debug!(%cid, %codec, %fingerprint, "decoded envelope");
    Ok(Decoded {
        standard: RawDocument::new(header, claims),
        fingerprint,
    })
}
