//! # Inkwell Infrastructure
//!
//! Concrete implementations of the `PostRepository` port defined in
//! `inkwell-core`, plus the store connection lifecycle.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All stores enabled
//! - `minimal` - No external stores, in-memory only
//! - `relational` - PostgreSQL / SQLite via SeaORM
//! - `document` - MongoDB

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository, Storage};

#[cfg(feature = "relational")]
pub use database::SqlPostRepository;

#[cfg(feature = "document")]
pub use database::MongoPostRepository;
