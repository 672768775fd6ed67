//! Canonical JSON serialization and content hashing.
//!
//! The commit config hash and the preview ETag both depend on a single
//! deterministic serializer: object keys sorted, arrays in declared order,
//! scalars rendered exactly as `serde_json` renders them. Divergence between
//! the two consumers would break cache stability, so both go through here.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::SiteConfig;
use crate::error::CoreError;

/// SHA-256 hex digest of arbitrary bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Render a JSON value canonically: object keys in ascending byte order,
/// everything else as `serde_json` would emit it.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // serde_json string rendering gives stable escaping.
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Serialize any value to its canonical JSON form.
pub fn to_canonical<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let tree = serde_json::to_value(value)
        .map_err(|e| CoreError::Internal(format!("serialization failed: {e}")))?;
    Ok(canonical_json(&tree))
}

/// Content hash of a site configuration.
///
/// `configId` and `generatedAt` are the only non-deterministic fields of a
/// generated config, so they are elided before hashing: two generations of
/// the same draft state hash identically.
pub fn config_hash(config: &SiteConfig) -> Result<String, CoreError> {
    let mut tree = serde_json::to_value(config)
        .map_err(|e| CoreError::Internal(format!("serialization failed: {e}")))?;
    if let Some(map) = tree.as_object_mut() {
        map.remove("configId");
        map.remove("generatedAt");
    }
    Ok(sha256_hex(canonical_json(&tree).as_bytes()))
}

/// Weak ETag for a config: `W/"{configId}:{hash[0..16]}"`.
///
/// Identical for HTML and JSON previews of the same logical config.
pub fn config_etag(config: &SiteConfig) -> Result<String, CoreError> {
    let hash = config_hash(config)?;
    Ok(format!("W/\"{}:{}\"", config.config_id, &hash[..16]))
}
