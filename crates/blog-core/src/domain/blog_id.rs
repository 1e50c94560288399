use std::fmt;

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Store-assigned identifier of a blog post.
///
/// Wraps a 12-byte ObjectId. The leading bytes are a creation timestamp, so
/// ids generated later compare greater; the "recent" feeds rely on that
/// ordering instead of a timestamp field. On the wire it is the 24-character
/// lowercase hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlogId(ObjectId);

impl BlogId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the hex form. Anything that is not exactly 24 hex digits is rejected.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::InvalidId(format!("'{raw}' is not a valid blog id")))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BlogId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for BlogId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlogId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
