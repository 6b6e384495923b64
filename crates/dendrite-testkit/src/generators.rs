//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Generate a plausible structural claim.
pub fn structural() -> impl Strategy<Value = Value> {
    (
        "bafy[a-z2-7]{55}",
        proptest::option::of("/[a-z0-9_-]{1,16}\\.(m3u8|mp4|webm)"),
    )
        .prop_map(|(cid, path)| match path {
            Some(path) => json!({"cid": cid, "path": path}),
            None => json!({"cid": cid}),
        })
}

/// Generate a descriptive claim, with a few extra fields.
pub fn descriptive() -> impl Strategy<Value = Value> {
    (
        ".{0,40}",
        ".{0,200}",
        proptest::collection::btree_map("[a-z]{3,10}", "[ -~]{0,20}", 0..4),
    )
        .prop_map(|(title, description, extra)| {
            let mut claim: Map<String, Value> = extra
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            claim.insert("title".into(), Value::String(title));
            claim.insert("description".into(), Value::String(description));
            Value::Object(claim)
        })
}

/// Generate a technical claim: any subset of the numeric fields.
pub fn technical() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(0u64..=u64::from(u32::MAX)),
        proptest::option::of(1u32..=7680),
        proptest::option::of(1u32..=4320),
        proptest::option::of(0u32..=36_000),
    )
        .prop_map(|(size, width, height, length)| {
            let mut claim = Map::new();
            if let Some(size) = size {
                claim.insert("size".into(), json!(size));
            }
            if let Some(width) = width {
                claim.insert("width".into(), json!(width));
            }
            if let Some(height) = height {
                claim.insert("height".into(), json!(height));
            }
            if let Some(length) = length {
                claim.insert("length".into(), json!(length));
            }
            Value::Object(claim)
        })
}

/// Generate a complete, schema-valid `{s, d, t}` object.
pub fn metadata() -> impl Strategy<Value = Value> {
    (structural(), descriptive(), technical()).prop_map(|(s, d, t)| json!({"s": s, "d": d, "t": t}))
}

/// Generate a payload object with at least one of `s`, `d`, `t` absent or null.
pub fn incomplete_payload() -> impl Strategy<Value = Value> {
    (0u8..7, any::<bool>()).prop_map(|(present, null_instead)| {
        let mut payload = Map::new();
        for (bit, key) in ["s", "d", "t"].into_iter().enumerate() {
            if present & (1 << bit) != 0 {
                payload.insert(
                    key.into(),
                    json!("bafkreigivmxldega53btdykjl6m5ka6sxlsmqonc4rbpwfi2emuvo2ebnu"),
                );
            } else if null_instead {
                payload.insert(key.into(), Value::Null);
            }
        }
        Value::Object(payload)
    })
}

/// Parameters for generating a signed document.
#[derive(Debug, Clone)]
pub struct MetadataParams {
    pub seed: [u8; 32],
    pub metadata: Value,
}

impl Arbitrary for MetadataParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        // Seeds of 0x01..=0x7f in the first byte are always valid P-256 scalars.
        (1u8..0x80, any::<[u8; 31]>(), metadata())
            .prop_map(|(head, tail, metadata)| {
                let mut seed = [0u8; 32];
                seed[0] = head;
                seed[1..].copy_from_slice(&tail);
                MetadataParams { seed, metadata }
            })
            .boxed()
    }
}
