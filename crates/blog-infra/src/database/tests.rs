#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blog_core::domain::{BlogId, NewBlog, UpdateOutcome};
    use blog_core::error::RepoError;
    use blog_core::ports::BlogRepository;
    use blog_core::query::{BlogQuery, Feed};
    use serde_json::json;

    use crate::database::{DatabaseConfig, DatabaseConnection, MongoBlogRepository};

    /// Connect to a throwaway collection, or `None` when no MongoDB is reachable.
    async fn get_test_repo() -> Option<MongoBlogRepository> {
        let mut config = DatabaseConfig::new(
            std::env::var("MONGODB_TEST_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        );
        config.database = "blogApp_test".to_string();
        config.collection = format!("blogs_{}", BlogId::generate());
        config.connect_timeout = Duration::from_secs(1);

        let conn = DatabaseConnection::init(&config).await.ok()?;
        conn.ping().await.ok()?;
        Some(conn.blogs())
    }

    async fn insert(repo: &MongoBlogRepository, body: serde_json::Value) -> BlogId {
        repo.insert(NewBlog::from_value(body).unwrap())
            .await
            .unwrap()
            .inserted_id
    }

    #[tokio::test]
    async fn test_mongo_insert_and_find_by_id() {
        let repo = match get_test_repo().await {
            Some(r) => r,
            None => {
                tracing::warn!("MongoDB not available, skipping test");
                return;
            }
        };

        let id = insert(&repo, json!({"title": "Stored", "category": "Apps"})).await;
        let blog = repo.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(blog.id, id);
        assert_eq!(blog.fields.get("title"), Some(&json!("Stored")));
        assert!(repo.find_by_id(BlogId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mongo_recent_feed_orders_by_id_descending() {
        let repo = match get_test_repo().await {
            Some(r) => r,
            None => return,
        };

        let mut ids = Vec::new();
        for n in 0..5 {
            ids.push(insert(&repo, json!({"n": n, "category": "Gadget"})).await);
        }

        let recent = repo.find(Feed::Recent.query()).await.unwrap();
        let recent_ids: Vec<BlogId> = recent.iter().map(|b| b.id).collect();
        ids.reverse();
        assert_eq!(recent_ids, ids[..4]);

        let gadgets = repo.find(Feed::RecentGadget.query()).await.unwrap();
        assert_eq!(gadgets.len(), 2);

        let all_gadgets = repo.find(BlogQuery::by_category("Gadget")).await.unwrap();
        assert_eq!(all_gadgets.len(), 5);
    }

    #[tokio::test]
    async fn test_mongo_push_comment_with_and_without_upsert() {
        let repo = match get_test_repo().await {
            Some(r) => r,
            None => return,
        };

        let id = insert(&repo, json!({"title": "Commented"})).await;
        let outcome = repo
            .push_comment(id, json!({"text": "first"}), false)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::modified_one());

        let missing = BlogId::generate();
        let miss = repo.push_comment(missing, json!("x"), false).await.unwrap();
        assert!(miss.is_miss());

        let upserted = repo.push_comment(missing, json!("x"), true).await.unwrap();
        assert_eq!(upserted.upserted_id, Some(missing));

        let blog = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(blog.comments().unwrap(), &vec![json!({"text": "first"})]);
    }

    #[tokio::test]
    async fn test_mongo_push_onto_non_array_is_a_conflict() {
        let repo = match get_test_repo().await {
            Some(r) => r,
            None => return,
        };

        let id = insert(&repo, json!({"comments": "closed"})).await;
        let err = repo.push_comment(id, json!("hi"), true).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }
}
