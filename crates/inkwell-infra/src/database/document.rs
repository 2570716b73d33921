//! Document post repository backed by MongoDB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use inkwell_core::domain::{NewPost, Page, Post, PostId};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{PostRepository, StorageBackend};

/// Collection holding post documents.
pub const POSTS_COLLECTION: &str = "posts";

/// On-disk shape of a post document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    pub publication_date: bson::DateTime,
}

impl From<NewPost> for PostDocument {
    fn from(post: NewPost) -> Self {
        Self {
            id: None,
            title: post.title,
            content: post.content,
            publication_date: bson::DateTime::from_millis(post.publication_date.timestamp_millis()),
        }
    }
}

impl TryFrom<PostDocument> for Post {
    type Error = RepoError;

    fn try_from(document: PostDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| RepoError::Query("post document without _id".to_string()))?;
        let millis = document.publication_date.timestamp_millis();
        let publication_date = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            RepoError::Query(format!("publication_date out of range: {millis}"))
        })?;

        Ok(Post {
            id: PostId::Object(id.to_hex()),
            title: document.title,
            content: document.content,
            publication_date,
        })
    }
}

/// Post repository over a MongoDB collection.
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(POSTS_COLLECTION),
        }
    }
}

/// Validate a raw identifier as an ObjectId hex string.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, RepoError> {
    ObjectId::parse_str(raw)
        .map_err(|_| RepoError::InvalidId(format!("'{raw}' is not a valid ObjectId")))
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Document
    }

    fn parse_id(&self, raw: &str) -> Result<PostId, RepoError> {
        parse_object_id(raw).map(|oid| PostId::Object(oid.to_hex()))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut document = PostDocument::from(post);

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_err)?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            RepoError::Query(format!("unexpected inserted id: {}", result.inserted_id))
        })?;
        tracing::debug!(post_id = %oid, "Inserted post document");

        document.id = Some(oid);
        document.try_into()
    }

    async fn get_by_id(&self, id: &PostId) -> Result<Post, RepoError> {
        let raw = id
            .as_object()
            .ok_or_else(|| RepoError::InvalidId(format!("'{id}' is not a valid ObjectId")))?;
        let oid = parse_object_id(raw)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_err)?
            .ok_or(RepoError::NotFound)?
            .try_into()
    }

    async fn list(&self, page: Page) -> Result<Vec<Post>, RepoError> {
        // A MongoDB limit of 0 means "no limit".
        if page.is_empty() {
            return Ok(Vec::new());
        }

        let mut options = FindOptions::default();
        options.skip = Some(page.skip);
        options.limit = Some(page.limit as i64);

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(map_mongo_err)?;

        let documents: Vec<PostDocument> = cursor.try_collect().await.map_err(map_mongo_err)?;

        documents.into_iter().map(Post::try_from).collect()
    }
}

pub(crate) fn map_mongo_err(err: mongodb::error::Error) -> RepoError {
    use mongodb::error::ErrorKind;

    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => RepoError::Connection(err.to_string()),
        ErrorKind::Write(_) => RepoError::Constraint(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}
