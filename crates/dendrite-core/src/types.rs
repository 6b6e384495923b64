//! Strong type definitions for SEP-001 resolution.
//!
//! Identifiers are newtypes so a content reference cannot be confused with
//! an arbitrary string once it has been parsed.

use std::fmt;
use std::str::FromStr;

use cid::multihash::Multihash;
use cid::Cid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Multicodec code for raw binary blocks.
pub const RAW_CODE: u64 = 0x55;

/// Multicodec code for dag-jose nodes.
pub const DAG_JOSE_CODE: u64 = 0x85;

/// Multicodec code for dag-cbor nodes.
pub const DAG_CBOR_CODE: u64 = 0x71;

/// Multihash code for sha2-256.
pub const SHA2_256_CODE: u64 = 0x12;

/// A self-describing content identifier (CID).
///
/// Equality is by the underlying reference value: version, codec and
/// multihash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(Cid);

impl ContentId {
    /// Parse from the textual (multibase) form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Cid::try_from(s)
            .map(Self)
            .map_err(|e| CoreError::InvalidIdentifier(format!("{s}: {e}")))
    }

    /// Parse from the binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        Cid::try_from(bytes)
            .map(Self)
            .map_err(|e| CoreError::InvalidIdentifier(e.to_string()))
    }

    /// Compute a CIDv1 over `data` with a sha2-256 multihash.
    pub fn for_data(codec: u64, data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let hash = Multihash::<64>::wrap(SHA2_256_CODE, digest.as_slice())
            .expect("sha2-256 digest fits in a 64-byte multihash");
        Self(Cid::new_v1(codec, hash))
    }

    /// The multicodec code of the referenced content.
    pub fn codec(&self) -> u64 {
        self.0.codec()
    }

    /// The encoding tag: the codec rendered as lowercase hex with a `0x` prefix.
    pub fn codec_tag(&self) -> String {
        format!("0x{:x}", self.codec())
    }

    /// The binary form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    /// Borrow the wrapped CID.
    pub const fn as_cid(&self) -> &Cid {
        &self.0
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Cid> for ContentId {
    fn from(cid: Cid) -> Self {
        Self(cid)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
