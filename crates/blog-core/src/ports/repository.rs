use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Blog, BlogId, InsertOutcome, NewBlog, UpdateOutcome};
use crate::error::RepoError;
use crate::query::BlogQuery;

/// Blog repository - the single store operation behind every route.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Run a find: filter, then sort if requested, then limit.
    async fn find(&self, query: BlogQuery) -> Result<Vec<Blog>, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, RepoError>;

    /// Insert a post; the store assigns its identifier.
    async fn insert(&self, blog: NewBlog) -> Result<InsertOutcome, RepoError>;

    /// Append a comment to a post's `comments` array.
    ///
    /// With `upsert` set, a missing post is created as `{_id, comments: [comment]}`.
    async fn push_comment(
        &self,
        id: BlogId,
        comment: Value,
        upsert: bool,
    ) -> Result<UpdateOutcome, RepoError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
