//! In-memory post repository - used when no store is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use inkwell_core::domain::{NewPost, Page, Post, PostId};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{PostRepository, StorageBackend, parse_seq_id};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Post>,
}

/// In-memory repository keyed by sequential integers starting at 1.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    fn parse_id(&self, raw: &str) -> Result<PostId, RepoError> {
        parse_seq_id(raw)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = table.next_id;

        let post = Post::from_new(PostId::Seq(id), post);
        table.rows.insert(id, post.clone());

        Ok(post)
    }

    async fn get_by_id(&self, id: &PostId) -> Result<Post, RepoError> {
        let Some(id) = id.as_seq() else {
            return Err(RepoError::InvalidId(format!(
                "'{id}' is not a valid integer id"
            )));
        };

        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn list(&self, page: Page) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }
}
