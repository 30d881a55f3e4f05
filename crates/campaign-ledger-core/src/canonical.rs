//! Canonical JSON encoding for deterministic serialization.
//!
//! Every hash in the ledger is computed over canonical JSON:
//! - Object keys sorted by byte-wise comparison, at every depth
//! - Array order preserved
//! - No whitespace between tokens
//! - No HTML-entity escaping (`<`, `>` and `&` are emitted verbatim)
//! - Numbers formatted by `serde_json` as-is
//!
//! Keys are sorted here, in the writer. The ordering of whatever map type
//! backs `serde_json::Value` is never relied on.
//!
//! **CRITICAL**: This encoding is FROZEN. Changes break every stored event hash.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::CanonicalError;

/// Number of SHA-256 bytes kept in a content hash (32 hex characters).
pub const CONTENT_HASH_BYTES: usize = 16;

/// Encode any serializable value to canonical JSON bytes.
///
/// Fails only if the value cannot be represented as JSON (for example a map
/// with non-string keys).
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    let value = serde_json::to_value(value)?;
    canonical_value_bytes(&value)
}

/// Encode an already-parsed JSON value to canonical bytes.
pub fn canonical_value_bytes(value: &Value) -> Result<Vec<u8>, CanonicalError> {
    let mut buf = Vec::new();
    write_canonical(&mut buf, value)?;
    Ok(buf)
}

/// Parse raw JSON text and re-encode it canonically.
pub fn canonicalize_str(raw: &str) -> Result<Vec<u8>, CanonicalError> {
    let value: Value = serde_json::from_str(raw)?;
    canonical_value_bytes(&value)
}

/// Compute the content hash of a value.
///
/// SHA-256 over [`canonical_json`], truncated to the first
/// [`CONTENT_HASH_BYTES`] bytes and hex encoded. This identifies content; it
/// is not a security boundary (the HMAC chain signature is).
pub fn content_hash<T: Serialize + ?Sized>(value: &T) -> Result<String, CanonicalError> {
    let bytes = canonical_json(value)?;
    Ok(content_hash_bytes(&bytes))
}

/// Truncated SHA-256 hex over bytes that are already canonical.
pub fn content_hash_bytes(canonical: &[u8]) -> String {
    let digest = Sha256::digest(canonical);
    hex::encode(&digest[..CONTENT_HASH_BYTES])
}

/// Recursively write a JSON value with sorted object keys.
fn write_canonical(buf: &mut Vec<u8>, value: &Value) -> Result<(), CanonicalError> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            buf.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                serde_json::to_writer(&mut *buf, key)?;
                buf.push(b':');
                write_canonical(buf, item)?;
            }
            buf.push(b'}');
        }
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_canonical(buf, item)?;
            }
            buf.push(b']');
        }
        scalar => {
            serde_json::to_writer(&mut *buf, scalar)?;
        }
    }
    Ok(())
}
