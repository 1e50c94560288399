use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BlogId;
use crate::error::DomainError;

/// Document key of the identifier.
pub const ID_FIELD: &str = "_id";
/// Document key of the post category ("Apps", "Technology", "Gadget", ...).
pub const CATEGORY_FIELD: &str = "category";
/// Document key of the author's email.
pub const EMAIL_FIELD: &str = "email";
/// Document key of the append-only comment sequence.
pub const COMMENTS_FIELD: &str = "comments";

/// Blog entity - one stored post.
///
/// Only the identifier is typed. Every other field is kept exactly as it was
/// submitted, so the JSON form is `{"_id": "<hex>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: BlogId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Blog {
    pub fn new(id: BlogId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Comments in append order, if the post has any.
    pub fn comments(&self) -> Option<&[Value]> {
        self.fields
            .get(COMMENTS_FIELD)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

/// A post as submitted for creation, before the store assigns its id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBlog {
    fields: Map<String, Value>,
}

impl NewBlog {
    /// Accept any JSON object. A client-supplied `_id` is dropped.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self { fields }
    }

    /// Accept a raw JSON body; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            other => Err(DomainError::Validation(format!(
                "a blog must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Attach the identifier assigned by the store.
    pub fn into_blog(self, id: BlogId) -> Blog {
        Blog::new(id, self.fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
