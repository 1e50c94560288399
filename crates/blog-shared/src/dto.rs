//! Data Transfer Objects - acknowledgment bodies returned by the write routes.
//!
//! Field names follow the store acknowledgment shape clients of the blog
//! app already read (`insertedId`, `matchedCount`, ...).

use serde::{Deserialize, Serialize};

/// Response to `POST /addBlog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAcknowledgment {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertAcknowledgment {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Response to `PUT /addComment/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcknowledgment {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    /// Always present; `null` unless the update created a document.
    pub upserted_id: Option<String>,
}

impl UpdateAcknowledgment {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<String>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}
