//! Post storage: adapters and connection lifecycle.

mod connections;
mod memory;

#[cfg(feature = "relational")]
mod relational;

#[cfg(feature = "relational")]
pub mod entity;

#[cfg(feature = "document")]
mod document;

pub use connections::{DEFAULT_DOCUMENT_DATABASE, DatabaseConfig, Storage};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "relational")]
pub use relational::SqlPostRepository;

#[cfg(feature = "document")]
pub use document::{MongoPostRepository, POSTS_COLLECTION, parse_object_id};

#[cfg(feature = "relational")]
#[cfg(test)]
mod tests;
