//! Golden vectors: real SEP-001 envelopes through the full pipeline.
//!
//! Every vector must decode to the same fingerprint, or fail the same way,
//! on every run and through every entry point.

use dendrite::core::{JoseError, DAG_JOSE_CODE, RAW_CODE};
use dendrite::{
    lookup, Codec, CompactDecoder, ContentId, Decoder, Dendrite, DendriteError,
    EmbeddedKeyVerifier, MemoryResolver,
};
use dendrite_testkit::vectors::{
    all_vectors, dag_jose_dag_json_node, golden_resolver, Expected, COMPACT_CID,
    COMPACT_FINGERPRINT, DAG_JOSE_CID, DAG_JOSE_FINGERPRINT, DAG_JOSE_LINK, INVALID_HEADER_CID,
    INVALID_PAYLOAD_CID,
};
use dendrite_testkit::sample_metadata;

fn cid(s: &str) -> ContentId {
    ContentId::parse(s).unwrap()
}

#[tokio::test]
async fn test_every_vector_through_its_decoder() {
    let resolver = golden_resolver();
    let verifier = EmbeddedKeyVerifier::default();

    for vector in all_vectors() {
        let cid = cid(vector.cid);
        // The private-key vector carries codec 0x2; the compact decoder is
        // what its envelope was built for.
        let construct = lookup(&cid.codec_tag()).unwrap_or(Codec::Raw.decoder());
        let result = construct(&resolver, &verifier).decode(&cid).await;

        match vector.expected {
            Expected::Fingerprint(fingerprint) => {
                let decoded = result.unwrap_or_else(|e| panic!("{}: {e}", vector.name));
                assert!(decoded.fingerprint.matches(fingerprint), "{}", vector.name);
            }
            Expected::InvalidHeader => assert!(
                matches!(result, Err(DendriteError::InvalidHeader(_))),
                "{}: {result:?}",
                vector.name
            ),
            Expected::InvalidPayload => assert!(
                matches!(result, Err(DendriteError::InvalidPayload(_))),
                "{}: {result:?}",
                vector.name
            ),
        }
    }
}

#[tokio::test]
async fn test_compact_vector_end_to_end() {
    let dendrite = Dendrite::new(golden_resolver());
    let sep001 = dendrite.resolve(COMPACT_CID).await.unwrap();

    assert_eq!(sep001.typ(), "application/vnd.apple.mpegurl");
    assert!(sep001.validate(COMPACT_FINGERPRINT));
    assert!(!sep001.validate("wrong"));
    assert_eq!(
        serde_json::to_value(sep001.metadata()).unwrap(),
        sample_metadata()
    );
    assert_eq!(sep001.header().jwk.crv.as_deref(), Some("P-256"));
}

#[tokio::test]
async fn test_dag_jose_vector_end_to_end() {
    let dendrite = Dendrite::new(golden_resolver());
    let sep001 = dendrite.resolve(DAG_JOSE_CID).await.unwrap();

    assert_eq!(sep001.cid().codec(), DAG_JOSE_CODE);
    assert!(sep001.validate(DAG_JOSE_FINGERPRINT));
    assert!(!sep001.validate(COMPACT_FINGERPRINT));
    assert_eq!(
        serde_json::to_value(sep001.metadata()).unwrap(),
        sample_metadata()
    );
}

#[tokio::test]
async fn test_dag_jose_vector_as_dag_json() {
    let resolver = MemoryResolver::new();
    resolver.put_node(cid(DAG_JOSE_CID), dag_jose_dag_json_node());
    resolver.put_node(cid(DAG_JOSE_LINK), sample_metadata());

    let dendrite = Dendrite::new(resolver);
    let sep001 = dendrite.resolve(DAG_JOSE_CID).await.unwrap();
    assert!(sep001.validate(DAG_JOSE_FINGERPRINT));
    assert_eq!(
        serde_json::to_value(sep001.metadata()).unwrap(),
        sample_metadata()
    );
}

#[tokio::test]
async fn test_empty_payload_vector() {
    let dendrite = Dendrite::new(golden_resolver());
    let err = dendrite.resolve(INVALID_PAYLOAD_CID).await.unwrap_err();

    assert_eq!(cid(INVALID_PAYLOAD_CID).codec(), RAW_CODE);
    assert!(matches!(err, DendriteError::InvalidPayload(_)));
    assert_eq!(
        err.to_string(),
        "unexpected payload: the claims \"s\", \"t\" or \"d\" are not present in payload"
    );
}

#[tokio::test]
async fn test_private_key_vector() {
    let resolver = golden_resolver();
    let verifier = EmbeddedKeyVerifier::default();

    // Through the facade the identifier's codec is what fails first.
    let dendrite = Dendrite::new(golden_resolver());
    assert!(matches!(
        dendrite.resolve(INVALID_HEADER_CID).await,
        Err(DendriteError::UnsupportedCodec(ref tag)) if tag == "0x2"
    ));

    let err = CompactDecoder::new(&resolver, &verifier)
        .decode(&cid(INVALID_HEADER_CID))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DendriteError::InvalidHeader(JoseError::PrivateKeyEmbedded)
    ));
}

#[tokio::test]
async fn test_fingerprint_deterministic_across_calls() {
    let dendrite = Dendrite::new(golden_resolver());
    for _ in 0..3 {
        let decoded = dendrite.decode(&cid(COMPACT_CID)).await.unwrap();
        assert_eq!(decoded.fingerprint.as_str(), COMPACT_FINGERPRINT);
    }
}
