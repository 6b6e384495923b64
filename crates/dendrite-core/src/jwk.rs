//! Embedded key material and signer fingerprints.
//!
//! A fingerprint is the RFC 7638 JWK thumbprint (SHA-256 over the canonical
//! JSON of the key's required members) rendered as lowercase hex.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// A JSON Web Key as carried in a protected header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Jwk {
    /// Whether the key carries secret material.
    ///
    /// Symmetric (`oct`) keys are always secret.
    pub fn is_private(&self) -> bool {
        self.kty == "oct" || self.extra.contains_key("d")
    }

    /// The RFC 7638 thumbprint of this key.
    pub fn thumbprint(&self) -> Result<[u8; 32], ValidationError> {
        let mut members = BTreeMap::new();
        members.insert("kty", self.kty.as_str());

        let required: Vec<(&str, &Option<String>)> = match self.kty.as_str() {
            "EC" => vec![("crv", &self.crv), ("x", &self.x), ("y", &self.y)],
            "OKP" => vec![("crv", &self.crv), ("x", &self.x)],
            "RSA" => vec![("e", &self.e), ("n", &self.n)],
            "oct" => vec![("k", &self.k)],
            other => {
                return Err(ValidationError::InvalidKey(format!(
                    "unsupported key type \"{other}\""
                )))
            }
        };

        for (name, value) in required {
            let value = value.as_deref().ok_or_else(|| {
                ValidationError::InvalidKey(format!(
                    "{} key is missing member \"{name}\"",
                    self.kty
                ))
            })?;
            members.insert(name, value);
        }

        let canonical = serde_json::to_string(&members)
            .map_err(|e| ValidationError::InvalidKey(e.to_string()))?;
        Ok(Sha256::digest(canonical.as_bytes()).into())
    }
}

/// Lowercase hex thumbprint identifying a signer independently of its key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a key.
    pub fn of(jwk: &Jwk) -> Result<Self, ValidationError> {
        Ok(Self(hex::encode(jwk.thumbprint()?)))
    }

    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain string equality against a candidate fingerprint.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p256_jwk() -> Jwk {
        serde_json::from_value(json!({
            "alg": "ES256",
            "crv": "P-256",
            "kty": "EC",
            "use": "sig",
            "x": "v6dEOAoc6yqgwz0tqdS9MuKNDViU1JM-Z330v2Vfcy4",
            "y": "XFdf6GP_TMm7U2P0xJ1G5OfustcfOeHfcvxrQsyQOyo"
        }))
        .unwrap()
    }

    #[test]
    fn test_fingerprint_known_key() {
        let fingerprint = Fingerprint::of(&p256_jwk()).unwrap();
        assert_eq!(
            fingerprint.as_str(),
            "aba44a9673c452de6183c82919de2cdb8b830615e9ac684841502ba7173ee00a"
        );
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of(&p256_jwk()).unwrap();
        let b = Fingerprint::of(&p256_jwk()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_ignores_optional_members() {
        let mut jwk = p256_jwk();
        let before = Fingerprint::of(&jwk).unwrap();
        jwk.key_use = None;
        jwk.alg = None;
        jwk.extra.insert("kid".into(), json!("key-1"));
        assert_eq!(Fingerprint::of(&jwk).unwrap(), before);
    }

    #[test]
    fn test_okp_thumbprint() {
        let jwk: Jwk = serde_json::from_value(json!({
            "kty": "OKP",
            "crv": "Ed25519",
            "x": "IVL40Zt5HSRFMkLhXy6rbLfP-ntqXtMAl5YOBpiB2xI"
        }))
        .unwrap();
        assert_eq!(
            Fingerprint::of(&jwk).unwrap().as_str(),
            "9c402ba631b791831cc5b773227c86941118414c3b45f01f7b74f0d5f66f000d"
        );
    }

    #[test]
    fn test_missing_member_is_invalid_key() {
        let mut jwk = p256_jwk();
        jwk.y = None;
        let err = Fingerprint::of(&jwk).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidKey(ref m) if m.contains("\"y\"")));
    }

    #[test]
    fn test_empty_key_is_invalid() {
        // No `kty` at all fails before thumbprinting.
        assert!(serde_json::from_value::<Jwk>(json!({})).is_err());

        let jwk: Jwk = serde_json::from_value(json!({"kty": ""})).unwrap();
        assert!(matches!(
            Fingerprint::of(&jwk),
            Err(ValidationError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_private_detection() {
        let mut jwk = p256_jwk();
        assert!(!jwk.is_private());
        jwk.extra.insert("d".into(), json!("secret"));
        assert!(jwk.is_private());
    }

    #[test]
    fn test_matches() {
        let fingerprint = Fingerprint::of(&p256_jwk()).unwrap();
        assert!(fingerprint.matches(
            "aba44a9673c452de6183c82919de2cdb8b830615e9ac684841502ba7173ee00a"
        ));
        assert!(!fingerprint.matches("wrong"));
    }
}
