//! Read query model: what to match, how to order, how many to return.

use serde_json::Value;

use crate::domain::{Blog, CATEGORY_FIELD, EMAIL_FIELD};

/// Which posts a query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogFilter {
    All,
    Category(String),
    AuthorEmail(String),
}

impl BlogFilter {
    /// Exact, case-sensitive equality on the filtered field. An array field
    /// matches when any element is equal, as a document-store equality
    /// filter does.
    pub fn matches(&self, blog: &Blog) -> bool {
        match self {
            BlogFilter::All => true,
            BlogFilter::Category(category) => field_equals(blog, CATEGORY_FIELD, category),
            BlogFilter::AuthorEmail(email) => field_equals(blog, EMAIL_FIELD, email),
        }
    }
}

fn field_equals(blog: &Blog, key: &str, wanted: &str) -> bool {
    match blog.fields.get(key) {
        Some(Value::String(value)) => value == wanted,
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(wanted)),
        _ => false,
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Identifier descending. Ids are time-ordered, so this is most recent first.
    NewestFirst,
}

/// A single find: filter, then optional sort, then optional limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    pub filter: BlogFilter,
    pub order: Option<SortOrder>,
    pub limit: Option<u32>,
}

impl BlogQuery {
    pub fn all() -> Self {
        Self::filtered(BlogFilter::All)
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self::filtered(BlogFilter::Category(category.into()))
    }

    pub fn by_author_email(email: impl Into<String>) -> Self {
        Self::filtered(BlogFilter::AuthorEmail(email.into()))
    }

    /// The two most recent posts sharing a category.
    pub fn similar(category: impl Into<String>) -> Self {
        Self::by_category(category).newest_first().limit(2)
    }

    pub fn newest_first(mut self) -> Self {
        self.order = Some(SortOrder::NewestFirst);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn filtered(filter: BlogFilter) -> Self {
        Self {
            filter,
            order: None,
            limit: None,
        }
    }
}

/// The fixed "recent posts" feeds shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Recent,
    RecentApps,
    Hero,
    RecentTechnology,
    RecentGadget,
}

impl Feed {
    pub fn query(self) -> BlogQuery {
        let base = match self.category() {
            Some(category) => BlogQuery::by_category(category),
            None => BlogQuery::all(),
        };
        base.newest_first().limit(self.size())
    }

    pub fn category(self) -> Option<&'static str> {
        match self {
            Feed::Recent | Feed::Hero => None,
            Feed::RecentApps => Some("Apps"),
            Feed::RecentTechnology => Some("Technology"),
            Feed::RecentGadget => Some("Gadget"),
        }
    }

    pub fn size(self) -> u32 {
        match self {
            Feed::Recent => 4,
            Feed::RecentApps | Feed::RecentTechnology => 3,
            Feed::RecentGadget => 2,
            Feed::Hero => 1,
        }
    }
}
