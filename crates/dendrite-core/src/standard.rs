//! SEP-001 documents, before and after schema validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::claims::{Payload, RawClaims};
use crate::jose::VerifiedHeader;
use crate::jwk::Jwk;

/// SEP-001 header: media type, algorithm and the signer's public key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    pub typ: String,
    pub alg: String,
    pub jwk: Jwk,
}

/// A complete, schema-validated SEP-001 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardDocument {
    pub header: Header,
    pub payload: Payload,
}

impl StandardDocument {
    /// Build the typed document from JSON that already passed the schema.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// A decoded document whose claims are resolved but not yet schema-checked.
///
/// The header is kept exactly as it was signed so the schema sees every
/// parameter, including ones it will reject.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub header: Map<String, Value>,
    pub payload: RawClaims,
}

impl RawDocument {
    pub fn new(header: VerifiedHeader, payload: RawClaims) -> Self {
        Self {
            header: header.into_fields(),
            payload,
        }
    }

    /// The `{header, payload}` JSON the schema validates.
    pub fn to_value(&self) -> Value {
        let mut document = Map::new();
        document.insert("header".into(), Value::Object(self.header.clone()));
        document.insert("payload".into(), self.payload.to_value());
        Value::Object(document)
    }
}
