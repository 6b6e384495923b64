//! Error types for the Dendrite core.

use thiserror::Error;

use crate::schema::SchemaViolation;

/// Errors raised while parsing identifiers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid content identifier: {0}")]
    InvalidIdentifier(String),
}

/// Envelope and signature failures.
///
/// Every variant here surfaces to callers as an invalid header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoseError {
    #[error("malformed envelope: {0}")]
    Malformed(String),

    #[error("\"jwk\" (JSON Web Key) header parameter missing")]
    MissingKey,

    #[error("\"jwk\" (JSON Web Key) header parameter must be a public key")]
    PrivateKeyEmbedded,

    #[error("\"alg\" (Algorithm) header parameter missing or invalid")]
    MissingAlgorithm,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("embedded key algorithm {key} does not match header algorithm {header}")]
    AlgorithmMismatch { header: String, key: String },

    #[error("invalid embedded key: {0}")]
    InvalidKey(String),

    #[error("signature verification failed")]
    SignatureMismatch,

    #[error("envelope carries no signatures")]
    NoSignatures,
}

/// Claims, key and schema validation failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unexpected payload: the claims \"s\", \"t\" or \"d\" are not present in payload")]
    MissingClaims(Vec<&'static str>),

    #[error("unexpected payload: claim \"{claim}\" {reason}")]
    InvalidClaim { claim: &'static str, reason: String },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid standard: {}", format_violations(.0))]
    Schema(Vec<SchemaViolation>),
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
