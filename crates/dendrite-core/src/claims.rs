//! SEP-001 claims: structural, descriptive and technical metadata.
//!
//! A verified payload first carries the three claims as references (or, for
//! linked envelopes, as embedded objects). [`validate_claims`] checks that all
//! three are present before anything else touches them; their inner shape is
//! left to the schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ValidationError;
use crate::types::ContentId;

/// The claim keys, in the order they are resolved.
pub const CLAIM_KEYS: [&str; 3] = ["s", "d", "t"];

/// The `s`, `d` and `t` claims of a payload, in any state of resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims<T> {
    pub s: T,
    pub d: T,
    pub t: T,
}

/// Claims as found in a compact payload: references to separately stored objects.
pub type ClaimsReferences = Claims<ContentId>;

/// Claims resolved to JSON but not yet checked against the schema.
pub type RawClaims = Claims<Value>;

impl<T> Claims<T> {
    /// Convert every claim, stopping at the first failure.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(&'static str, T) -> Result<U, E>,
    ) -> Result<Claims<U>, E> {
        Ok(Claims {
            s: f("s", self.s)?,
            d: f("d", self.d)?,
            t: f("t", self.t)?,
        })
    }
}

impl RawClaims {
    /// Interpret each claim as a content identifier string.
    pub fn into_references(self) -> Result<ClaimsReferences, ValidationError> {
        self.try_map(|claim, value| {
            let text = value.as_str().ok_or_else(|| ValidationError::InvalidClaim {
                claim,
                reason: "is not a content identifier string".into(),
            })?;
            ContentId::parse(text).map_err(|e| ValidationError::InvalidClaim {
                claim,
                reason: e.to_string(),
            })
        })
    }

    /// The claims as a JSON object with exactly the keys `s`, `d` and `t`.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("s".into(), self.s.clone());
        object.insert("d".into(), self.d.clone());
        object.insert("t".into(), self.t.clone());
        Value::Object(object)
    }
}

/// Check that `candidate` carries all of `s`, `d` and `t`.
///
/// Absent and `null` claims are both rejected. Nothing else about the claims
/// is inspected.
pub fn validate_claims(candidate: &Value) -> Result<RawClaims, ValidationError> {
    let object = candidate.as_object();
    let claim = |key: &str| {
        object
            .and_then(|o| o.get(key))
            .filter(|v| !v.is_null())
            .cloned()
    };

    match (claim("s"), claim("d"), claim("t")) {
        (Some(s), Some(d), Some(t)) => Ok(Claims { s, d, t }),
        (s, d, t) => {
            let missing = [("s", s.is_none()), ("d", d.is_none()), ("t", t.is_none())]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
            Err(ValidationError::MissingClaims(missing))
        }
    }
}

/// Internal structure of a multimedia resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Structural {
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// What a multimedia resource is about.
///
/// Fields beyond `title` and `description` pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptive {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Technical characteristics of a multimedia resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technical {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully resolved SEP-001 claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Payload {
    pub s: Structural,
    pub d: Descriptive,
    pub t: Technical,
}
