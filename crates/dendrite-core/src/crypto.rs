//! Signature verification against embedded keys.
//!
//! The [`JwsVerifier`] trait is the seam for the cryptographic primitives;
//! [`EmbeddedKeyVerifier`] is the default implementation, covering ES256
//! (P-256 ECDSA) and EdDSA (Ed25519).

use std::fmt;

use p256::ecdsa::signature::Verifier;
use serde::{Deserialize, Serialize};

use crate::error::JoseError;
use crate::jose::decode_b64url;
use crate::jwk::Jwk;

/// JWS algorithms understood by [`EmbeddedKeyVerifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "ES256")]
    Es256,
    #[serde(rename = "EdDSA")]
    EdDsa,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 2] = [Algorithm::Es256, Algorithm::EdDsa];

    /// The JOSE `alg` name.
    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::Es256 => "ES256",
            Algorithm::EdDsa => "EdDSA",
        }
    }

    /// Look up an algorithm by its JOSE `alg` name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.name() == name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verifies a JWS signature with a given key.
///
/// Implementations must be thread-safe: one verifier is shared by every
/// decode.
pub trait JwsVerifier: Send + Sync {
    /// Verify `signature` over `signing_input` using `jwk` and algorithm `alg`.
    fn verify(
        &self,
        alg: &str,
        jwk: &Jwk,
        signing_input: &[u8],
        signature: &[u8],
    ) -> Result<(), JoseError>;
}

/// Default verifier: trusts only the key handed to it, restricted to a set of
/// algorithms.
#[derive(Debug, Clone)]
pub struct EmbeddedKeyVerifier {
    algorithms: Vec<Algorithm>,
}

impl EmbeddedKeyVerifier {
    /// Create a verifier accepting only `algorithms`.
    pub fn new(algorithms: Vec<Algorithm>) -> Self {
        Self { algorithms }
    }

    /// The accepted algorithms.
    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }
}

impl Default for EmbeddedKeyVerifier {
    fn default() -> Self {
        Self::new(Algorithm::ALL.to_vec())
    }
}

impl JwsVerifier for EmbeddedKeyVerifier {
    fn verify(
        &self,
        alg: &str,
        jwk: &Jwk,
        signing_input: &[u8],
        signature: &[u8],
    ) -> Result<(), JoseError> {
        let algorithm = Algorithm::from_name(alg)
            .filter(|a| self.algorithms.contains(a))
            .ok_or_else(|| JoseError::UnsupportedAlgorithm(alg.to_owned()))?;

        match algorithm {
            Algorithm::Es256 => verify_es256(jwk, signing_input, signature),
            Algorithm::EdDsa => verify_eddsa(jwk, signing_input, signature),
        }
    }
}

fn verify_es256(jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<(), JoseError> {
    use p256::ecdsa::{Signature, VerifyingKey};
    use p256::{EncodedPoint, FieldBytes};

    if jwk.kty != "EC" || jwk.crv.as_deref() != Some("P-256") {
        return Err(JoseError::InvalidKey(
            "ES256 requires an EC key on curve P-256".into(),
        ));
    }

    let x = coordinate(jwk.x.as_deref(), "x", 32)?;
    let y = coordinate(jwk.y.as_deref(), "y", 32)?;
    let point = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(&x),
        FieldBytes::from_slice(&y),
        false,
    );
    let verifying_key = VerifyingKey::from_encoded_point(&point)
        .map_err(|_| JoseError::InvalidKey("point is not on curve P-256".into()))?;

    let signature = Signature::from_slice(signature).map_err(|_| JoseError::SignatureMismatch)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| JoseError::SignatureMismatch)
}

fn verify_eddsa(jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<(), JoseError> {
    use ed25519_dalek::{Signature, VerifyingKey};

    if jwk.kty != "OKP" || jwk.crv.as_deref() != Some("Ed25519") {
        return Err(JoseError::InvalidKey(
            "EdDSA requires an OKP key on curve Ed25519".into(),
        ));
    }

    let x = coordinate(jwk.x.as_deref(), "x", 32)?;
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&x);
    let verifying_key = VerifyingKey::from_bytes(&bytes)
        .map_err(|e| JoseError::InvalidKey(e.to_string()))?;

    let signature = Signature::from_slice(signature).map_err(|_| JoseError::SignatureMismatch)?;
    verifying_key
        .verify_strict(message, &signature)
        .map_err(|_| JoseError::SignatureMismatch)
}

/// Decode a base64url key member and check its length.
fn coordinate(value: Option<&str>, name: &str, len: usize) -> Result<Vec<u8>, JoseError> {
    let value = value.ok_or_else(|| JoseError::InvalidKey(format!("missing \"{name}\"")))?;
    let bytes = decode_b64url(value)
        .map_err(|e| JoseError::InvalidKey(format!("\"{name}\" is not base64url: {e}")))?;
    if bytes.len() != len {
        return Err(JoseError::InvalidKey(format!(
            "\"{name}\" must be {len} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}
