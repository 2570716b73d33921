//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    /// Defaults to the creation instant when absent. An explicit null is rejected.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub publication_date: Option<DateTime<Utc>>,
}

/// Partial update shape. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPartialUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Identifier as rendered to clients: a number for integer-keyed stores,
/// a string for the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

/// A persisted post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDb {
    pub id: ResourceId,
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

/// Query string for `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Simple `{"message": ...}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with offset), offset-less date-times and bare dates.
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("invalid datetime format: '{raw}'"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    // Only reached when the field is present, so null is a type error here.
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_post_create_without_date() {
        let post: PostCreate =
            serde_json::from_str(r#"{"title":"Hello","content":"World"}"#).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert!(post.publication_date.is_none());
    }

    #[test]
    fn test_post_create_missing_content_fails() {
        let err = serde_json::from_str::<PostCreate>(r#"{"title":"Hello"}"#).unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_post_create_wrong_type_fails() {
        assert!(serde_json::from_str::<PostCreate>(r#"{"title":5,"content":"x"}"#).is_err());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2023-05-01T12:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-05-01T14:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-05-01T12:30:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2023-05-01").unwrap(),
            Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_post_create_bad_date_fails() {
        let body = r#"{"title":"a","content":"b","publication_date":"soon"}"#;
        assert!(serde_json::from_str::<PostCreate>(body).is_err());
    }

    #[test]
    fn test_post_create_null_date_fails() {
        let body = r#"{"title":"a","content":"b","publication_date":null}"#;
        let err = serde_json::from_str::<PostCreate>(body).unwrap_err();
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_partial_update_all_optional() {
        let update: PostPartialUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.title.is_none());
        assert!(update.content.is_none());

        let update: PostPartialUpdate = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.content.is_none());
    }

    #[test]
    fn test_resource_id_rendering() {
        let json = serde_json::to_value(ResourceId::Int(1)).unwrap();
        assert_eq!(json, serde_json::json!(1));
        let json = serde_json::to_value(ResourceId::Text("abc".into())).unwrap();
        assert_eq!(json, serde_json::json!("abc"));
    }
}
