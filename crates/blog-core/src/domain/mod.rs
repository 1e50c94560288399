//! Domain entities - the blog post and the store's write acknowledgments.

mod blog;
mod blog_id;
mod outcome;

pub use blog::{Blog, CATEGORY_FIELD, COMMENTS_FIELD, EMAIL_FIELD, ID_FIELD, NewBlog};
pub use blog_id::BlogId;
pub use outcome::{InsertOutcome, UpdateOutcome};
