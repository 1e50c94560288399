//! Blog store: connection management and repository implementations.

mod connections;
mod memory;

#[cfg(feature = "mongodb")]
mod convert;
#[cfg(feature = "mongodb")]
pub mod mongo_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryBlogRepository;

#[cfg(feature = "mongodb")]
pub use connections::DatabaseConnection;
#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoBlogRepository;

#[cfg(feature = "mongodb")]
#[cfg(test)]
mod tests;
