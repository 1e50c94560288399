//! MongoDB repository implementation.

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::{Collection, Database};
use serde_json::Value;

use blog_core::domain::{
    Blog, BlogId, CATEGORY_FIELD, COMMENTS_FIELD, EMAIL_FIELD, ID_FIELD, InsertOutcome, NewBlog,
    UpdateOutcome,
};
use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;
use blog_core::query::{BlogFilter, BlogQuery, SortOrder};

use super::convert::{blog_from_document, document_from_new_blog, json_to_bson};

/// Blog repository backed by one MongoDB collection.
///
/// Holds cloned driver handles; clones share the client's connection pool.
#[derive(Clone)]
pub struct MongoBlogRepository {
    database: Database,
    collection: Collection<Document>,
}

impl MongoBlogRepository {
    pub fn new(database: Database, collection: &str) -> Self {
        let collection = database.collection::<Document>(collection);
        Self {
            database,
            collection,
        }
    }
}

fn filter_document(filter: &BlogFilter) -> Document {
    match filter {
        BlogFilter::All => Document::new(),
        BlogFilter::Category(category) => doc! { CATEGORY_FIELD: category.as_str() },
        BlogFilter::AuthorEmail(email) => doc! { EMAIL_FIELD: email.as_str() },
    }
}

fn sort_document(order: SortOrder) -> Document {
    match order {
        SortOrder::NewestFirst => doc! { ID_FIELD: -1 },
    }
}

/// Server selection and network failures are connectivity problems. Write
/// errors (e.g. `$push` onto a non-array) are conflicts with stored data;
/// unsatisfied write concerns are not.
fn map_mongo_error(err: MongoError) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => RepoError::Connection(err.to_string()),
        ErrorKind::Write(WriteFailure::WriteError(_)) => RepoError::Constraint(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// Mask the local part of an email so author lookups stay out of the logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 1 => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn find(&self, query: BlogQuery) -> Result<Vec<Blog>, RepoError> {
        match &query.filter {
            BlogFilter::AuthorEmail(email) => tracing::debug!(
                author_email = %mask_email(email),
                "Finding blogs by author"
            ),
            filter => tracing::debug!(
                ?filter,
                order = ?query.order,
                limit = ?query.limit,
                "Finding blogs"
            ),
        }

        let mut find = self.collection.find(filter_document(&query.filter));
        if let Some(order) = query.order {
            find = find.sort(sort_document(order));
        }
        if let Some(limit) = query.limit {
            find = find.limit(i64::from(limit));
        }

        let documents: Vec<Document> = find
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;

        documents.into_iter().map(blog_from_document).collect()
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, RepoError> {
        tracing::debug!(blog_id = %id, "Finding blog by id");

        self.collection
            .find_one(doc! { ID_FIELD: id.object_id() })
            .await
            .map_err(map_mongo_error)?
            .map(blog_from_document)
            .transpose()
    }

    async fn insert(&self, blog: NewBlog) -> Result<InsertOutcome, RepoError> {
        let id = BlogId::generate();
        let document = document_from_new_blog(id, &blog)?;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;

        let inserted_id = match result.inserted_id {
            Bson::ObjectId(oid) => BlogId::from(oid),
            other => {
                return Err(RepoError::Query(format!(
                    "store returned a non-ObjectId insert id: {other}"
                )));
            }
        };
        tracing::info!(blog_id = %inserted_id, "Blog inserted");

        Ok(InsertOutcome { inserted_id })
    }

    async fn push_comment(
        &self,
        id: BlogId,
        comment: Value,
        upsert: bool,
    ) -> Result<UpdateOutcome, RepoError> {
        let mut push = Document::new();
        push.insert(COMMENTS_FIELD, json_to_bson(&comment)?);

        let result = self
            .collection
            .update_one(doc! { ID_FIELD: id.object_id() }, doc! { "$push": push })
            .upsert(upsert)
            .await
            .map_err(map_mongo_error)?;

        let upserted_id = result
            .upserted_id
            .as_ref()
            .and_then(Bson::as_object_id)
            .map(BlogId::from);
        tracing::info!(
            blog_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            upserted = upserted_id.is_some(),
            "Comment pushed"
        );

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted_id,
        })
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_target_document_fields() {
        assert_eq!(filter_document(&BlogFilter::All), Document::new());
        assert_eq!(
            filter_document(&BlogFilter::Category("Apps".into())),
            doc! { "category": "Apps" }
        );
        assert_eq!(
            filter_document(&BlogFilter::AuthorEmail("a@example.com".into())),
            doc! { "email": "a@example.com" }
        );
        assert_eq!(sort_document(SortOrder::NewestFirst), doc! { "_id": -1 });
    }

    fn write_failure(failure: Document) -> MongoError {
        let failure: WriteFailure = bson::from_document(failure).unwrap();
        MongoError::from(ErrorKind::Write(failure))
    }

    #[test]
    fn test_write_errors_conflict_but_write_concern_errors_do_not() {
        let push_onto_scalar = write_failure(doc! {
            "WriteError": { "code": 2, "codeName": "BadValue", "errmsg": "not an array" }
        });
        assert!(matches!(
            map_mongo_error(push_onto_scalar),
            RepoError::Constraint(_)
        ));

        let replication_timeout = write_failure(doc! {
            "WriteConcernError": { "code": 64, "codeName": "WriteConcernFailed", "errmsg": "waiting for replication timed out" }
        });
        assert!(matches!(
            map_mongo_error(replication_timeout),
            RepoError::Query(_)
        ));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("writer@example.com"), "w***@example.com");
        assert_eq!(mask_email("w@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
