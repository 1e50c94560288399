//! In-memory blog store - used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use blog_core::domain::{Blog, BlogId, COMMENTS_FIELD, InsertOutcome, NewBlog, UpdateOutcome};
use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;
use blog_core::query::{BlogQuery, SortOrder};

/// In-memory blog store keyed by id.
///
/// Ids are time-ordered, so ascending key order doubles as insertion order
/// for unsorted queries. Data is lost on process restart.
pub struct InMemoryBlogRepository {
    store: RwLock<BTreeMap<BlogId, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find(&self, query: BlogQuery) -> Result<Vec<Blog>, RepoError> {
        let store = self.store.read().await;
        let limit = query.limit.map_or(usize::MAX, |l| l as usize);

        let blogs: Box<dyn Iterator<Item = &Blog> + '_> = match query.order {
            Some(SortOrder::NewestFirst) => Box::new(store.values().rev()),
            None => Box::new(store.values()),
        };

        Ok(blogs
            .filter(|blog| query.filter.matches(blog))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, blog: NewBlog) -> Result<InsertOutcome, RepoError> {
        let mut store = self.store.write().await;

        let mut id = BlogId::generate();
        while store.contains_key(&id) {
            id = BlogId::generate();
        }
        store.insert(id, blog.into_blog(id));

        Ok(InsertOutcome { inserted_id: id })
    }

    async fn push_comment(
        &self,
        id: BlogId,
        comment: Value,
        upsert: bool,
    ) -> Result<UpdateOutcome, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&id) {
            if !upsert {
                return Ok(UpdateOutcome::default());
            }
            let mut fields = serde_json::Map::new();
            fields.insert(COMMENTS_FIELD.to_string(), Value::Array(vec![comment]));
            store.insert(id, Blog::new(id, fields));
            return Ok(UpdateOutcome::upserted(id));
        }

        let blog = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        match blog
            .fields
            .entry(COMMENTS_FIELD)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(comments) => {
                comments.push(comment);
                Ok(UpdateOutcome::modified_one())
            }
            _ => Err(RepoError::Constraint(format!(
                "field '{COMMENTS_FIELD}' of blog {id} is not an array"
            ))),
        }
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use blog_core::query::Feed;
    use serde_json::json;

    async fn insert(repo: &InMemoryBlogRepository, body: Value) -> BlogId {
        repo.insert(NewBlog::from_value(body).unwrap())
            .await
            .unwrap()
            .inserted_id
    }

    #[tokio::test]
    async fn test_insert_then_find_by_id() {
        let repo = InMemoryBlogRepository::new();
        let id = insert(&repo, json!({"title": "First", "category": "Apps"})).await;

        let blog = repo.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(blog.id, id);
        assert_eq!(blog.fields.get("title"), Some(&json!("First")));
        assert_eq!(blog.fields.get("category"), Some(&json!("Apps")));
    }

    #[tokio::test]
    async fn test_find_by_unknown_id_is_none() {
        let repo = InMemoryBlogRepository::new();
        insert(&repo, json!({"title": "First"})).await;

        assert!(repo.find_by_id(BlogId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_feed_is_prefix_of_newest_first_order() {
        let repo = InMemoryBlogRepository::new();
        for n in 0..6 {
            insert(&repo, json!({"n": n})).await;
        }

        let everything = repo.find(BlogQuery::all().newest_first()).await.unwrap();
        let recent = repo.find(Feed::Recent.query()).await.unwrap();

        assert_eq!(recent.len(), 4);
        assert_eq!(recent[..], everything[..4]);
        assert!(recent.windows(2).all(|pair| pair[0].id > pair[1].id));
        assert_eq!(recent[0].fields.get("n"), Some(&json!(5)));
    }

    #[tokio::test]
    async fn test_category_listing_returns_exactly_matching_posts() {
        let repo = InMemoryBlogRepository::new();
        let apps_a = insert(&repo, json!({"category": "Apps"})).await;
        insert(&repo, json!({"category": "Gadget"})).await;
        let apps_b = insert(&repo, json!({"category": "Apps"})).await;
        insert(&repo, json!({"title": "no category"})).await;

        let found = repo.find(BlogQuery::by_category("Apps")).await.unwrap();
        let mut ids: Vec<BlogId> = found.iter().map(|b| b.id).collect();
        ids.sort();

        assert_eq!(ids, vec![apps_a, apps_b]);
    }

    #[tokio::test]
    async fn test_category_feeds_respect_limit_and_filter() {
        let repo = InMemoryBlogRepository::new();
        for _ in 0..4 {
            insert(&repo, json!({"category": "Gadget"})).await;
            insert(&repo, json!({"category": "Technology"})).await;
        }

        let gadgets = repo.find(Feed::RecentGadget.query()).await.unwrap();
        assert_eq!(gadgets.len(), 2);
        assert!(gadgets.iter().all(|b| b.fields["category"] == "Gadget"));

        let apps = repo.find(Feed::RecentApps.query()).await.unwrap();
        assert!(apps.is_empty());
    }

    #[tokio::test]
    async fn test_author_listing_is_unbounded() {
        let repo = InMemoryBlogRepository::new();
        for _ in 0..7 {
            insert(&repo, json!({"email": "writer@example.com"})).await;
        }
        insert(&repo, json!({"email": "other@example.com"})).await;

        let found = repo
            .find(BlogQuery::by_author_email("writer@example.com"))
            .await
            .unwrap();

        assert_eq!(found.len(), 7);
    }

    #[tokio::test]
    async fn test_push_comment_appends_in_order() {
        let repo = InMemoryBlogRepository::new();
        let id = insert(&repo, json!({"title": "Post", "comments": [{"text": "first"}]})).await;

        let outcome = repo
            .push_comment(id, json!({"text": "second"}), true)
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::modified_one());
        let blog = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(
            blog.comments().unwrap(),
            &vec![json!({"text": "first"}), json!({"text": "second"})]
        );
    }

    #[tokio::test]
    async fn test_push_comment_creates_missing_array() {
        let repo = InMemoryBlogRepository::new();
        let id = insert(&repo, json!({"title": "Post"})).await;

        repo.push_comment(id, json!("nice"), false).await.unwrap();

        let blog = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(blog.comments().unwrap(), &vec![json!("nice")]);
    }

    #[tokio::test]
    async fn test_push_comment_upserts_missing_post() {
        let repo = InMemoryBlogRepository::new();
        let id = BlogId::generate();

        let outcome = repo.push_comment(id, json!({"text": "hi"}), true).await.unwrap();

        assert_eq!(outcome, UpdateOutcome::upserted(id));
        let blog = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(blog.comments().unwrap(), &vec![json!({"text": "hi"})]);
    }

    #[tokio::test]
    async fn test_push_comment_without_upsert_leaves_store_untouched() {
        let repo = InMemoryBlogRepository::new();

        let outcome = repo
            .push_comment(BlogId::generate(), json!({"text": "hi"}), false)
            .await
            .unwrap();

        assert!(outcome.is_miss());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_push_comment_rejects_non_array_comments() {
        let repo = InMemoryBlogRepository::new();
        let id = insert(&repo, json!({"comments": "closed"})).await;

        let err = repo.push_comment(id, json!("hi"), true).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_comments_are_not_lost() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let id = insert(&repo, json!({"title": "Busy post"})).await;

        let tasks: Vec<_> = (0..32)
            .map(|n| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.push_comment(id, json!(n), true).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let blog = repo.find_by_id(id).await.unwrap().unwrap();
        let comments = blog.comments().unwrap();
        assert_eq!(comments.len(), 32);
        for n in 0..32 {
            assert!(comments.contains(&json!(n)));
        }
    }
}
