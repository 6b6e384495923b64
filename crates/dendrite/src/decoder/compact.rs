//! Compact encoding: a JWS token in a raw block, claims stored separately.

use async_trait::async_trait;
use dendrite_core::{
    validate_claims, Claims, ClaimsReferences, CompactJws, ContentId, JoseError, JwsVerifier,
    RawClaims,
};
use dendrite_resolver::ContentResolver;
use serde_json::Value;

use super::{finish, parse_json, rejected, Decoded, Decoder};
use crate::error::Result;
use crate::registry::Codec;

/// Decodes a compact JWS whose payload references `s`, `d` and `t` by CID.
pub struct CompactDecoder<'a> {
    resolver: &'a dyn ContentResolver,
    verifier: &'a dyn JwsVerifier,
}

impl<'a> CompactDecoder<'a> {
    pub fn new(resolver: &'a dyn ContentResolver, verifier: &'a dyn JwsVerifier) -> Self {
        Self { resolver, verifier }
    }

    /// Fetch all three claims concurrently. The first failure wins.
    async fn fetch_claims(&self, references: ClaimsReferences) -> Result<RawClaims> {
        let (s, d, t) = tokio::try_join!(
            self.fetch_claim("s", &references.s),
            self.fetch_claim("d", &references.d),
            self.fetch_claim("t", &references.t),
        )?;
        Ok(Claims { s, d, t })
    }

    async fn fetch_claim(&self, claim: &str, cid: &ContentId) -> Result<Value> {
        tracing::trace!(%cid, claim, "fetching claim");
        let bytes = self.resolver.block(cid).await?;
        parse_json(&bytes, &format!("claim \"{claim}\""))
    }
}

#[async_trait]
impl Decoder for CompactDecoder<'_> {
    fn codec(&self) -> Codec {
        Codec::Raw
    }

    async fn decode(&self, cid: &ContentId) -> Result<Decoded> {
        let block = self.resolver.block(cid).await?;
        let verified = std::str::from_utf8(&block)
            .map_err(|e| JoseError::Malformed(format!("token is not UTF-8: {e}")))
            .and_then(CompactJws::parse)
            .and_then(|jws| jws.verify(self.verifier));
        let (header, payload) = verified.map_err(|e| rejected(self.codec(), cid, e))?;

        let payload = parse_json(&payload, "payload")?;
        let references = validate_claims(&payload)?.into_references()?;
        let claims = self.fetch_claims(references).await?;

        finish(self.codec(), cid, header, claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dendrite_core::EmbeddedKeyVerifier;
    use dendrite_resolver::{MemoryResolver, ResolveError};
    use dendrite_testkit::TestFixture;
    use serde_json::json;

    use crate::error::DendriteError;

    #[tokio::test]
    async fn test_decode_resolves_claims() {
        let fixture = TestFixture::new();
        let cid = fixture.store_compact();
        let verifier = EmbeddedKeyVerifier::default();

        let decoded = CompactDecoder::new(&fixture.resolver, &verifier)
            .decode(&cid)
            .await
            .unwrap();
        assert_eq!(decoded.standard.payload.to_value(), fixture.metadata());
        assert_eq!(decoded.fingerprint, fixture.fingerprint());
        assert_eq!(decoded.standard.header["typ"], json!(fixture.typ()));
    }

    #[tokio::test]
    async fn test_token_that_is_not_utf8() {
        let resolver = MemoryResolver::new();
        let cid = resolver.insert_block(vec![0xff, 0xfe, 0x00]);
        let verifier = EmbeddedKeyVerifier::default();

        let err = CompactDecoder::new(&resolver, &verifier)
            .decode(&cid)
            .await
            .unwrap_err();
        assert!(matches!(err, DendriteError::InvalidHeader(JoseError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_payload_that_is_not_json() {
        let fixture = TestFixture::new();
        let cid = fixture.resolver.insert_block(fixture.sign_compact(b"not json"));
        let verifier = EmbeddedKeyVerifier::default();

        let err = CompactDecoder::new(&fixture.resolver, &verifier)
            .decode(&cid)
            .await
            .unwrap_err();
        assert!(matches!(err, DendriteError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_reference_that_is_not_a_cid() {
        let fixture = TestFixture::new();
        let token = fixture.sign_compact(br#"{"s":"nope","d":"nope","t":"nope"}"#);
        let cid = fixture.resolver.insert_block(token);
        let verifier = EmbeddedKeyVerifier::default();

        let err = CompactDecoder::new(&fixture.resolver, &verifier)
            .decode(&cid)
            .await
            .unwrap_err();
        assert!(matches!(err, DendriteError::InvalidPayload(ref m) if m.contains("\"s\"")));
        assert_eq!(fixture.resolver.fetched(), vec![cid]);
    }

    #[tokio::test]
    async fn test_missing_claim_block() {
        let fixture = TestFixture::new();
        let cid = fixture.store_compact();
        let verifier = EmbeddedKeyVerifier::default();

        // Same token, but none of the claims it references.
        let resolver = MemoryResolver::new();
        resolver.put_block(cid, fixture.resolver.block(&cid).await.unwrap());
        let err = CompactDecoder::new(&resolver, &verifier)
            .decode(&cid)
            .await
            .unwrap_err();
        assert!(matches!(err, DendriteError::Resolve(ResolveError::NotFound(_))));
    }
}
