//! Hashing - Stable Keys for Facets and Results
//!
//! Facet states hash through canonical JSON so equal intent gives an equal
//! key. Result lists hash by their work id sequence.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::catalog::WorkId;
use crate::facets::FacetState;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Cache key for a facet state.
pub fn facets_hash(facets: &FacetState) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(facets)?.as_bytes()))
}

/// Identity of an ordered result list: same ids in the same order.
pub fn results_fingerprint(ids: impl IntoIterator<Item = WorkId>) -> String {
    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.0.to_be_bytes());
    }
    hex::encode(hasher.finalize())
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
