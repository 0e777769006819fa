//! # Configuration Digests
//!
//! Content-addressed digests over the canonical JSON form of a value, used to
//! fingerprint the loaded configuration so an assessment report records
//! exactly which tables produced it.
//!
//! Canonical form: the value is converted to a `serde_json::Value` first
//! (object keys sorted, since `serde_json::Map` is a `BTreeMap` without the
//! `preserve_order` feature) and serialized with compact separators.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AssessError;

/// A SHA-256 digest of canonical JSON bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Digest any serializable value through its canonical JSON form.
///
/// # Errors
///
/// Returns [`AssessError::Serialization`] if the value cannot be represented
/// as JSON (e.g. a map with non-string keys).
pub fn canonical_json_digest(value: &impl Serialize) -> Result<ContentDigest, AssessError> {
    let canonical = serde_json::to_value(value)?;
    let bytes = serde_json::to_vec(&canonical)?;
    let hash = Sha256::digest(&bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    Ok(ContentDigest { bytes: out })
}
