//! # Canonical JSON bytes
//!
//! Deterministic serialization of JSON documents into the byte sequence
//! that gets hashed and signed. Object members are emitted in ascending
//! key order with no insignificant whitespace, so two semantically equal
//! documents always canonicalize to identical bytes regardless of the
//! insertion order their maps happened to have.
//!
//! ## Security Invariant
//!
//! Signing and digest APIs in this workspace accept `&CanonicalBytes`,
//! not `&[u8]`. Constructing a `CanonicalBytes` is the only way to reach
//! them, which keeps ad-hoc `serde_json::to_vec()` output out of the
//! signing path.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted to a JSON tree.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// The canonical byte representation of a JSON document.
///
/// Equal documents produce equal bytes: object keys are sorted, arrays
/// keep their order, and the output carries no whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    pub fn new<T: Serialize>(value: &T) -> Result<Self, CanonicalizationError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Canonicalize an already-built JSON tree.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        let mut out = Vec::new();
        write_canonical(&mut out, &value)?;
        Ok(Self(out))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn write_canonical(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        // serde_json numbers are finite by construction; its own formatter
        // is the canonical rendering.
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => out.extend_from_slice(&serde_json::to_vec(s)?),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                out.extend_from_slice(&serde_json::to_vec(key)?);
                out.push(b':');
                write_canonical(out, &map[key.as_str()])?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}
