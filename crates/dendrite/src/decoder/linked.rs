//! Linked encoding: a general JWS in a dag-jose node, claims linked by CID.

use async_trait::async_trait;
use dendrite_core::{validate_claims, ContentId, GeneralJws, JwsVerifier};
use dendrite_resolver::ContentResolver;

use super::{finish, rejected, Decoded, Decoder};
use crate::error::Result;
use crate::registry::Codec;

/// Path from a dag-jose node to the payload it signs.
const LINK_PATH: &str = "/link";

/// Decodes a dag-jose node whose signed payload links to embedded claims.
pub struct LinkedDecoder<'a> {
    resolver: &'a dyn ContentResolver,
    verifier: &'a dyn JwsVerifier,
}

impl<'a> LinkedDecoder<'a> {
    pub fn new(resolver: &'a dyn ContentResolver, verifier: &'a dyn JwsVerifier) -> Self {
        Self { resolver, verifier }
    }
}

#[async_trait]
impl Decoder for LinkedDecoder<'_> {
    fn codec(&self) -> Codec {
        Codec::LinkedSigned
    }

    async fn decode(&self, cid: &ContentId) -> Result<Decoded> {
        let node = self.resolver.node(cid, None).await?;
        let jws = GeneralJws::from_node(node).map_err(|e| rejected(self.codec(), cid, e))?;
        let (header, linked) = jws
            .verify(self.verifier)
            .map_err(|e| rejected(self.codec(), cid, e))?;

        // Claims are only fetched once the envelope has verified. Without a
        // `link` member the signed CID is fetched directly.
        tracing::trace!(%cid, %linked, "fetching linked claims");
        let claims = match jws.link {
            Some(_) => self.resolver.node(cid, Some(LINK_PATH)).await?,
            None => self.resolver.node(&linked, None).await?,
        };
        let claims = validate_claims(&claims)?;

        finish(self.codec(), cid, header, claims)
    }
}
