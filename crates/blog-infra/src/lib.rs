//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external store, in-memory only
//! - `mongodb` - MongoDB document store via the official driver

pub mod database;

pub use database::{DatabaseConfig, InMemoryBlogRepository};

#[cfg(feature = "mongodb")]
pub use database::{DatabaseConnection, MongoBlogRepository};
