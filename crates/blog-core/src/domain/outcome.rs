use super::BlogId;

/// Acknowledgment of an insert: the identifier the store assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted_id: BlogId,
}

/// Acknowledgment of an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents that matched the filter.
    pub matched: u64,
    /// Documents actually changed.
    pub modified: u64,
    /// Set when nothing matched and a new document was created instead.
    pub upserted_id: Option<BlogId>,
}

impl UpdateOutcome {
    pub fn modified_one() -> Self {
        Self {
            matched: 1,
            modified: 1,
            upserted_id: None,
        }
    }

    pub fn upserted(id: BlogId) -> Self {
        Self {
            matched: 0,
            modified: 0,
            upserted_id: Some(id),
        }
    }

    /// True when the update neither matched nor created anything.
    pub fn is_miss(&self) -> bool {
        self.matched == 0 && self.upserted_id.is_none()
    }
}
