//! # Blog Core
//!
//! The domain layer of the blog API: the post document, its identifier,
//! the read query model and the repository port.
//! This crate performs no I/O.

pub mod domain;
pub mod error;
pub mod ports;
pub mod query;

pub use error::{DomainError, RepoError};
