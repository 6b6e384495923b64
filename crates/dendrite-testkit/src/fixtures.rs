//! Test fixtures and helpers.
//!
//! A [`TestFixture`] owns a P-256 signer and a [`MemoryResolver`], and knows
//! how to store SEP-001 envelopes of both encodings in it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use dendrite_core::{
    Claims, ClaimsReferences, ContentId, Fingerprint, Jwk, DAG_CBOR_CODE, DAG_JOSE_CODE,
};
use dendrite_resolver::MemoryResolver;
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use serde_json::{json, Value};

/// Media type used in fixture headers.
pub const MEDIA_TYPE: &str = "application/vnd.apple.mpegurl";

/// A test fixture with a signer and an in-memory resolver.
pub struct TestFixture {
    pub signing_key: SigningKey,
    pub resolver: MemoryResolver,
}

impl TestFixture {
    /// Create a new test fixture with a random key.
    pub fn new() -> Self {
        Self::from_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    /// Create with a deterministic key from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_key(SigningKey::from_slice(&seed).expect("seed is a valid P-256 scalar"))
    }

    fn from_key(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            resolver: MemoryResolver::new(),
        }
    }

    /// The media type the fixture signs documents as.
    pub fn typ(&self) -> &'static str {
        MEDIA_TYPE
    }

    /// The public JWK, with every member the SEP-001 schema requires.
    pub fn jwk(&self) -> Value {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        json!({
            "alg": "ES256",
            "crv": "P-256",
            "kty": "EC",
            "use": "sig",
            "x": URL_SAFE_NO_PAD.encode(point.x().expect("uncompressed point has x")),
            "y": URL_SAFE_NO_PAD.encode(point.y().expect("uncompressed point has y")),
        })
    }

    /// The fingerprint every envelope from this fixture resolves to.
    pub fn fingerprint(&self) -> Fingerprint {
        let jwk: Jwk = serde_json::from_value(self.jwk()).expect("fixture JWK deserializes");
        Fingerprint::of(&jwk).expect("fixture JWK has all members")
    }

    /// The protected header.
    pub fn header(&self) -> Value {
        json!({"alg": "ES256", "jwk": self.jwk(), "typ": MEDIA_TYPE})
    }

    /// The claims every stored envelope carries unless told otherwise.
    pub fn metadata(&self) -> Value {
        sample_metadata()
    }

    /// Sign `payload` as a compact JWS under the fixture header.
    pub fn sign_compact(&self, payload: &[u8]) -> String {
        self.sign_compact_with_header(&self.header(), payload)
    }

    /// Sign `payload` as a compact JWS under an arbitrary header.
    pub fn sign_compact_with_header(&self, header: &Value, payload: &[u8]) -> String {
        let protected = URL_SAFE_NO_PAD.encode(header.to_string());
        let payload = URL_SAFE_NO_PAD.encode(payload);
        let signature = self.sign(&protected, &payload);
        format!("{protected}.{payload}.{signature}")
    }

    fn sign(&self, protected: &str, payload: &str) -> String {
        let signing_input = format!("{protected}.{payload}");
        let signature: Signature = self.signing_key.sign(signing_input.as_bytes());
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    }

    /// Store each claim of `metadata` as its own raw block.
    pub fn store_claims(&self, metadata: &Value) -> ClaimsReferences {
        Claims {
            s: self.resolver.insert_block(metadata["s"].to_string()),
            d: self.resolver.insert_block(metadata["d"].to_string()),
            t: self.resolver.insert_block(metadata["t"].to_string()),
        }
    }

    /// References to the default claims, storing them if needed.
    pub fn claim_references(&self) -> ClaimsReferences {
        self.store_claims(&self.metadata())
    }

    /// Store a compact envelope for the default claims.
    pub fn store_compact(&self) -> ContentId {
        self.store_compact_with_metadata(self.metadata())
    }

    /// Store `metadata` as claim blocks and a compact envelope referencing them.
    pub fn store_compact_with_metadata(&self, metadata: Value) -> ContentId {
        let references = self.store_claims(&metadata);
        let payload = json!({
            "s": references.s.to_string(),
            "d": references.d.to_string(),
            "t": references.t.to_string(),
        });
        self.resolver
            .insert_block(self.sign_compact(payload.to_string().as_bytes()))
    }

    /// A dag-jose node signing `claims` by CID.
    pub fn linked_node(&self, claims: &ContentId) -> Value {
        let protected = URL_SAFE_NO_PAD.encode(self.header().to_string());
        let payload = URL_SAFE_NO_PAD.encode(claims.to_bytes());
        let signature = self.sign(&protected, &payload);
        json!({
            "link": {"/": claims.to_string()},
            "payload": payload,
            "signatures": [{"protected": protected, "signature": signature}],
        })
    }

    /// Store a linked envelope for the default claims.
    pub fn store_linked(&self) -> ContentId {
        self.store_linked_claims(self.metadata())
    }

    /// Store `claims` as a node and a dag-jose envelope linking to it.
    pub fn store_linked_claims(&self, claims: Value) -> ContentId {
        let claims = self.resolver.insert_node(DAG_CBOR_CODE, claims);
        self.resolver
            .insert_node(DAG_JOSE_CODE, self.linked_node(&claims))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures with distinct deterministic signers.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0x42u8; 32];
            seed[0] = i as u8 + 1;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// Sign `payload` as a compact EdDSA JWS with an embedded Ed25519 key.
///
/// The key carries no `y`, so the result verifies but never passes the
/// SEP-001 schema.
pub fn eddsa_compact(seed: [u8; 32], payload: &[u8]) -> String {
    use ed25519_dalek::Signer as _;

    let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
    let header = json!({
        "alg": "EdDSA",
        "jwk": {
            "alg": "EdDSA",
            "crv": "Ed25519",
            "kty": "OKP",
            "use": "sig",
            "x": URL_SAFE_NO_PAD.encode(signing_key.verifying_key().to_bytes()),
        },
        "typ": MEDIA_TYPE,
    });
    let protected = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload = URL_SAFE_NO_PAD.encode(payload);
    let signature = signing_key.sign(format!("{protected}.{payload}").as_bytes());
    format!(
        "{protected}.{payload}.{}",
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    )
}

/// A complete, schema-valid set of claims.
pub fn sample_metadata() -> Value {
    json!({
        "s": {
            "cid": "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
            "path": "/index.m3u8",
        },
        "d": {
            "title": "Big Buck Bunny",
            "description": "A large and lovable rabbit deals with three tiny bullies.",
            "creator": "Blender Foundation",
        },
        "t": {
            "size": 276134947,
            "width": 1920,
            "height": 1080,
            "length": 596,
        },
    })
}
