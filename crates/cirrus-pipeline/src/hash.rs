//! Content hashing for synthesized artifacts
//!
//! Blake3 over canonical JSON. Identical definitions synthesize to
//! identical hashes, which is how assembly drift is detected downstream.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content hash (Blake3), serialized as lowercase hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute the hash of arbitrary bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Compute the hash of a value's canonical JSON encoding
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn compute_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::compute(&serde_json::to_vec(value)?))
    }

    /// Underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ContentHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_input_identical_hash() {
        assert_eq!(ContentHash::compute(b"stack"), ContentHash::compute(b"stack"));
        assert_ne!(ContentHash::compute(b"stack"), ContentHash::compute(b"stacks"));
    }

    #[test]
    fn hex_round_trip() {
        let hash = ContentHash::compute(b"assembly");
        let parsed: ContentHash = hash.to_string().parse().unwrap();
        assert_eq!(parsed, hash);
        assert_eq!(hash.short().len(), 16);
    }

    #[test]
    fn serializable_hash_matches_byte_hash() {
        let value = serde_json::json!({ "stack": "Dev-ItemApi", "resources": {} });
        assert_eq!(
            ContentHash::compute_serializable(&value).unwrap(),
            ContentHash::compute(&serde_json::to_vec(&value).unwrap())
        );
    }

    #[test]
    fn serializes_as_hex_string() {
        let hash = ContentHash::compute(b"assembly");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{hash}\""));
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
