//! The Dendrite facade: resolve an identifier into a validated SEP-001 document.

use dendrite_core::{
    Algorithm, ContentId, EmbeddedKeyVerifier, Fingerprint, Header, JwsVerifier, Payload,
    SchemaValidator, SchemaViolation, StandardDocument,
};
use dendrite_resolver::ContentResolver;

use crate::decoder::Decoded;
use crate::error::{DendriteError, Result};
use crate::registry::{self, Codec};

/// Configuration for [`Dendrite`].
#[derive(Debug, Clone)]
pub struct DendriteConfig {
    /// Algorithms the embedded-key verifier accepts.
    ///
    /// Only used when Dendrite builds its own verifier.
    pub algorithms: Vec<Algorithm>,
    /// Schema every resolved document must satisfy.
    pub schema: SchemaValidator,
}

impl Default for DendriteConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            schema: SchemaValidator::default(),
        }
    }
}

/// Resolves SEP-001 documents through a content resolver.
///
/// Every call to [`resolve`](Self::resolve) is independent: nothing is
/// cached and nothing is shared between calls except the resolver.
pub struct Dendrite<R: ContentResolver> {
    resolver: R,
    verifier: Box<dyn JwsVerifier>,
    schema: SchemaValidator,
}

impl<R: ContentResolver> Dendrite<R> {
    /// Create a resolver with the default configuration.
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, DendriteConfig::default())
    }

    pub fn with_config(resolver: R, config: DendriteConfig) -> Self {
        let verifier = EmbeddedKeyVerifier::new(config.algorithms.clone());
        Self::with_verifier(resolver, verifier, config)
    }

    /// Use a custom signature verifier. `config.algorithms` is ignored.
    pub fn with_verifier(
        resolver: R,
        verifier: impl JwsVerifier + 'static,
        config: DendriteConfig,
    ) -> Self {
        Self {
            resolver,
            verifier: Box::new(verifier),
            schema: config.schema,
        }
    }

    /// Get the resolver reference.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Decode and verify `cid` without checking the schema.
    pub async fn decode(&self, cid: &ContentId) -> Result<Decoded> {
        let tag = cid.codec_tag();
        let construct = registry::lookup(&tag)?;
        tracing::debug!(%cid, codec = %tag, "selected decoder");

        let decoder = construct(&self.resolver, self.verifier.as_ref());
        decoder.decode(cid).await
    }

    /// Resolve `identifier` into a verified, schema-valid document.
    pub async fn resolve(&self, identifier: &str) -> Result<Sep001> {
        let cid = ContentId::parse(identifier)
            .map_err(|e| DendriteError::InvalidIdentifier(e.to_string()))?;
        let decoded = self.decode(&cid).await?;

        let document = decoded.standard.to_value();
        let violations = self.schema.violations(&document);
        if !violations.is_empty() {
            tracing::warn!(%cid, count = violations.len(), "document failed the SEP-001 schema");
            return Err(DendriteError::InvalidStandard(violations));
        }

        let standard = StandardDocument::from_value(document).map_err(|e| {
            DendriteError::InvalidStandard(vec![SchemaViolation {
                path: String::new(),
                message: e.to_string(),
            }])
        })?;

        Ok(Sep001 {
            cid,
            standard,
            fingerprint: decoded.fingerprint,
        })
    }
}

/// A resolved SEP-001 document and the fingerprint of its signer.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sep001 {
    cid: ContentId,
    standard: StandardDocument,
    fingerprint: Fingerprint,
}

impl Sep001 {
    /// The media type declared in the header.
    pub fn typ(&self) -> &str {
        &self.standard.header.typ
    }

    /// The resolved `s`, `d` and `t` claims.
    pub fn metadata(&self) -> &Payload {
        &self.standard.payload
    }

    /// Whether `fingerprint` is the fingerprint of the key that signed this document.
    pub fn validate(&self, fingerprint: &str) -> bool {
        self.fingerprint.matches(fingerprint)
    }

    pub fn header(&self) -> &Header {
        &self.standard.header
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn standard(&self) -> &StandardDocument {
        &self.standard
    }

    /// The identifier this document was resolved from.
    pub fn cid(&self) -> &ContentId {
        &self.cid
    }

    /// The encoding the document was stored in.
    pub fn codec(&self) -> Option<Codec> {
        Codec::of(&self.cid).ok()
    }
}
