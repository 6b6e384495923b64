//! Error types for SEP-001 resolution.

use dendrite_core::{JoseError, SchemaViolation, ValidationError};
use dendrite_resolver::ResolveError;
use thiserror::Error;

/// Errors that can occur while resolving a SEP-001 document.
///
/// None of these are retried locally. Resolution errors come straight from
/// the content resolver.
#[derive(Debug, Error)]
pub enum DendriteError {
    /// The textual identifier is not a content identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The identifier's encoding tag has no registered decoder.
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// The envelope did not verify against its embedded key.
    #[error("invalid header: {0}")]
    InvalidHeader(#[from] JoseError),

    /// The verified payload does not carry usable claims.
    #[error("{0}")]
    InvalidPayload(String),

    /// The signer's key cannot be fingerprinted.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The resolved document does not match the SEP-001 schema.
    #[error("invalid standard: {}", join_violations(.0))]
    InvalidStandard(Vec<SchemaViolation>),

    /// The content resolver failed.
    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),
}

impl From<ValidationError> for DendriteError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MissingClaims(_) | ValidationError::InvalidClaim { .. } => {
                DendriteError::InvalidPayload(e.to_string())
            }
            ValidationError::InvalidKey(message) => DendriteError::InvalidKey(message),
            ValidationError::Schema(violations) => DendriteError::InvalidStandard(violations),
        }
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, DendriteError>;
