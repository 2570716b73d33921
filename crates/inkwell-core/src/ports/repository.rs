use std::fmt;

use async_trait::async_trait;

use crate::domain::{NewPost, Page, Post, PostId};
use crate::error::RepoError;

/// Which kind of store backs a [`PostRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Relational,
    Document,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Relational => "relational",
            StorageBackend::Document => "document",
            StorageBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post storage adapter.
///
/// One implementation is selected at startup; handlers only see this trait.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// The kind of store behind this repository.
    fn backend(&self) -> StorageBackend;

    /// Resolve a raw path segment into this store's identifier format.
    ///
    /// Malformed input fails with [`RepoError::InvalidId`] before any lookup.
    fn parse_id(&self, raw: &str) -> Result<PostId, RepoError>;

    /// Persist a new post and return it with its assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Fetch a single post, or [`RepoError::NotFound`].
    async fn get_by_id(&self, id: &PostId) -> Result<Post, RepoError>;

    /// List posts in store order within the given window.
    async fn list(&self, page: Page) -> Result<Vec<Post>, RepoError>;
}

/// Parse a sequential integer id, shared by the integer-keyed stores.
pub fn parse_seq_id(raw: &str) -> Result<PostId, RepoError> {
    raw
        .parse::<i64>()
        .map(PostId::Seq)
        .map_err(|_| RepoError::InvalidId(format!("'{raw}' is not a valid integer id")))
}
