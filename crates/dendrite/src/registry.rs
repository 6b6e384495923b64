//! Codec registry: which decoder handles which encoding tag.

use std::fmt;

use dendrite_core::{ContentId, JwsVerifier, DAG_JOSE_CODE, RAW_CODE};
use dendrite_resolver::ContentResolver;

use crate::decoder::{CompactDecoder, Decoder, LinkedDecoder};
use crate::error::{DendriteError, Result};

/// Builds a decoder over a borrowed resolver and verifier.
pub type DecoderConstructor =
    for<'a> fn(&'a dyn ContentResolver, &'a dyn JwsVerifier) -> Box<dyn Decoder + 'a>;

/// The supported wire encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// A compact JWS stored as a raw block.
    Raw,
    /// A general JWS stored as a dag-jose node.
    LinkedSigned,
}

impl Codec {
    pub const ALL: [Codec; 2] = [Codec::Raw, Codec::LinkedSigned];

    /// The multicodec code.
    pub const fn code(&self) -> u64 {
        match self {
            Codec::Raw => RAW_CODE,
            Codec::LinkedSigned => DAG_JOSE_CODE,
        }
    }

    /// The encoding tag as derived from a content identifier.
    pub const fn tag(&self) -> &'static str {
        match self {
            Codec::Raw => "0x55",
            Codec::LinkedSigned => "0x85",
        }
    }

    /// Look up a codec by encoding tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.tag() == tag)
            .ok_or_else(|| DendriteError::UnsupportedCodec(tag.to_owned()))
    }

    /// The codec a content identifier commits to.
    pub fn of(cid: &ContentId) -> Result<Self> {
        Self::from_tag(&cid.codec_tag())
    }

    pub fn decoder(&self) -> DecoderConstructor {
        match self {
            Codec::Raw => compact,
            Codec::LinkedSigned => linked,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The decoder constructor registered for `tag`.
pub fn lookup(tag: &str) -> Result<DecoderConstructor> {
    Codec::from_tag(tag).map(|codec| codec.decoder())
}

fn compact<'a>(
    resolver: &'a dyn ContentResolver,
    verifier: &'a dyn JwsVerifier,
) -> Box<dyn Decoder + 'a> {
    Box::new(CompactDecoder::new(resolver, verifier))
}

fn linked<'a>(
    resolver: &'a dyn ContentResolver,
    verifier: &'a dyn JwsVerifier,
) -> Box<dyn Decoder + 'a> {
    Box::new(LinkedDecoder::new(resolver, verifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dendrite_core::{EmbeddedKeyVerifier, DAG_CBOR_CODE};
    use dendrite_resolver::MemoryResolver;

    #[test]
    fn test_lookup_registered_tags() {
        let resolver = MemoryResolver::new();
        let verifier = EmbeddedKeyVerifier::default();

        let decoder = lookup("0x55").unwrap()(&resolver, &verifier);
        assert_eq!(decoder.codec(), Codec::Raw);

        let decoder = lookup("0x85").unwrap()(&resolver, &verifier);
        assert_eq!(decoder.codec(), Codec::LinkedSigned);
    }

    #[test]
    fn test_lookup_unknown_tags() {
        for tag in ["0x71", "0x2", "", "55", "0X55"] {
            assert!(matches!(
                lookup(tag),
                Err(DendriteError::UnsupportedCodec(ref t)) if t == tag
            ));
        }
    }

    #[test]
    fn test_codec_of_identifier() {
        let raw = ContentId::for_data(RAW_CODE, b"token");
        assert_eq!(Codec::of(&raw).unwrap(), Codec::Raw);

        let jose = ContentId::for_data(DAG_JOSE_CODE, b"node");
        assert_eq!(Codec::of(&jose).unwrap(), Codec::LinkedSigned);

        let cbor = ContentId::for_data(DAG_CBOR_CODE, b"node");
        assert!(matches!(
            Codec::of(&cbor),
            Err(DendriteError::UnsupportedCodec(ref t)) if t == "0x71"
        ));
    }

    #[test]
    fn test_tags_match_codes() {
        for codec in Codec::ALL {
            assert_eq!(codec.tag(), format!("0x{:x}", codec.code()));
            assert_eq!(codec.to_string(), codec.tag());
        }
    }
}
