//! Conversions between stored BSON documents and the JSON-shaped domain.

use bson::{Bson, Document};
use serde_json::Value;

use blog_core::domain::{Blog, BlogId, ID_FIELD, NewBlog};
use blog_core::error::RepoError;

/// Turn a stored document into a `Blog`. The `_id` must be an ObjectId.
pub(crate) fn blog_from_document(mut document: Document) -> Result<Blog, RepoError> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => BlogId::from(oid),
        Some(other) => {
            return Err(RepoError::Query(format!(
                "stored blog has a non-ObjectId _id: {other}"
            )));
        }
        None => return Err(RepoError::Query("stored blog has no _id".to_string())),
    };

    let fields = document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();

    Ok(Blog::new(id, fields))
}

/// Build the document to insert, with the assigned `_id` first.
pub(crate) fn document_from_new_blog(id: BlogId, blog: &NewBlog) -> Result<Document, RepoError> {
    let body = bson::to_document(blog.fields()).map_err(|e| RepoError::Encoding(e.to_string()))?;

    let mut document = Document::new();
    document.insert(ID_FIELD, id.object_id());
    for (key, value) in body {
        document.insert(key, value);
    }
    Ok(document)
}

pub(crate) fn json_to_bson(value: &Value) -> Result<Bson, RepoError> {
    bson::to_bson(value).map_err(|e| RepoError::Encoding(e.to_string()))
}

/// ObjectIds render as hex and dates as RFC 3339 strings; the rest is relaxed extended JSON.
pub(crate) fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(date) => match date.try_to_rfc3339_string() {
            Ok(formatted) => Value::String(formatted),
            Err(_) => Value::from(date.timestamp_millis()),
        },
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
