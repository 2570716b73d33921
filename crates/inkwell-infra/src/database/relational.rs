//! Relational post repository backed by SeaORM (PostgreSQL or SQLite).

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DbConn, DbErr, EntityTrait, QueryOrder, QuerySelect, Schema,
};

use inkwell_core::domain::{NewPost, Page, Post, PostId};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{PostRepository, StorageBackend, parse_seq_id};

use super::entity::comment::Entity as CommentEntity;
use super::entity::post::{self, Entity as PostEntity};

/// Post repository over a SeaORM connection pool.
pub struct SqlPostRepository {
    pub(crate) db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Create the `posts` and `comments` tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepoError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut posts = schema.create_table_from_entity(PostEntity);
        posts.if_not_exists();
        let mut comments = schema.create_table_from_entity(CommentEntity);
        comments.if_not_exists();

        for stmt in [posts, comments] {
            self.db
                .execute(backend.build(&stmt))
                .await
                .map_err(map_db_err)?;
        }

        tracing::info!(backend = ?backend, "Relational schema ready");
        Ok(())
    }

    /// Close the connection pool.
    pub async fn close(&self) -> Result<(), RepoError> {
        self.db.close_by_ref().await.map_err(map_db_err)
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Relational
    }

    fn parse_id(&self, raw: &str) -> Result<PostId, RepoError> {
        parse_seq_id(raw)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let result = PostEntity::insert(post::ActiveModel::from(post))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = result.last_insert_id, "Inserted post");

        // Read the row back so the caller sees exactly what was stored.
        self.get_by_id(&PostId::Seq(result.last_insert_id)).await
    }

    async fn get_by_id(&self, id: &PostId) -> Result<Post, RepoError> {
        let id = id
            .as_seq()
            .ok_or_else(|| RepoError::InvalidId(format!("'{id}' is not a valid integer id")))?;

        PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn list(&self, page: Page) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate")
                || err_str.contains("unique")
                || err_str.contains("foreign key")
                || err_str.contains("too long")
            {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}
