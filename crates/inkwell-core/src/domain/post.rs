use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned post identifier.
///
/// Relational and in-memory stores hand out sequential integers; the document
/// store hands out opaque ObjectId hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Seq(i64),
    Object(String),
}

impl PostId {
    pub fn as_seq(&self) -> Option<i64> {
        match self {
            PostId::Seq(id) => Some(*id),
            PostId::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&str> {
        match self {
            PostId::Seq(_) => None,
            PostId::Object(id) => Some(id),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Seq(id) => write!(f, "{id}"),
            PostId::Object(id) => f.write_str(id),
        }
    }
}

/// Post entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

impl Post {
    /// Attach a store-assigned id to a not-yet-persisted post.
    pub fn from_new(id: PostId, post: NewPost) -> Self {
        Self {
            id,
            title: post.title,
            content: post.content,
            publication_date: post.publication_date,
        }
    }
}

/// A post that has not been written to a store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post, stamping it with the current time when no
    /// publication date is given.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        publication_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            publication_date: publication_date.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post_defaults_publication_date() {
        let before = Utc::now();
        let post = NewPost::new("Hello", "World", None);
        assert!(post.publication_date >= before);
        assert!(post.publication_date <= Utc::now());
    }

    #[test]
    fn test_new_post_keeps_supplied_date() {
        let date = Utc.with_ymd_and_hms(2021, 3, 14, 15, 9, 26).unwrap();
        let post = NewPost::new("Pi", "day", Some(date));
        assert_eq!(post.publication_date, date);
    }

    #[test]
    fn test_post_id_serializes_per_store() {
        assert_eq!(serde_json::to_string(&PostId::Seq(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&PostId::Object("65a1b2c3d4e5f6a7b8c9d0e1".into())).unwrap(),
            "\"65a1b2c3d4e5f6a7b8c9d0e1\""
        );
    }

    #[test]
    fn test_post_id_display() {
        assert_eq!(PostId::Seq(42).to_string(), "42");
        assert_eq!(PostId::Object("abc".into()).to_string(), "abc");
    }
}
