#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use inkwell_core::domain::{NewPost, Page, Post, PostId};
    use inkwell_core::error::RepoError;
    use inkwell_core::ports::{PostRepository, StorageBackend};
    use sea_orm::{ConnectOptions, Database, DatabaseBackend, MockDatabase};

    use crate::database::entity::post;
    use crate::database::{DatabaseConfig, SqlPostRepository, Storage};

    async fn sqlite_storage() -> Storage {
        Storage::open(Some(&DatabaseConfig::new("sqlite::memory:")))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = Utc::now();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                publication_date: now.into(),
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
            }]])
            .into_connection();

        let repo = SqlPostRepository::new(db);

        let post: Post = repo.get_by_id(&PostId::Seq(7)).await.unwrap();

        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, PostId::Seq(7));
        assert_eq!(post.publication_date, now);
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = SqlPostRepository::new(db);

        assert!(matches!(
            repo.get_by_id(&PostId::Seq(999)).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_object_id_rejected_by_relational_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = SqlPostRepository::new(db);

        assert!(matches!(repo.parse_id("abc"), Err(RepoError::InvalidId(_))));
        assert!(matches!(
            repo.get_by_id(&PostId::Object("65a1b2c3d4e5f6a7b8c9d0e1".into()))
                .await,
            Err(RepoError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_sqlite_create_then_get() {
        let storage = sqlite_storage().await;
        assert_eq!(storage.backend(), StorageBackend::Relational);
        let posts = storage.posts();

        let date = Utc.with_ymd_and_hms(2022, 11, 5, 9, 30, 0).unwrap();
        let created = posts
            .create(NewPost::new("Hello", "World", Some(date)))
            .await
            .unwrap();
        assert_eq!(created.id, PostId::Seq(1));

        let fetched = posts.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.content, "World");
        assert_eq!(fetched.publication_date, date);

        assert!(matches!(
            posts.get_by_id(&PostId::Seq(999)).await,
            Err(RepoError::NotFound)
        ));

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_sqlite_ids_are_sequential() {
        let storage = sqlite_storage().await;
        let posts = storage.posts();

        for expected in 1..=3 {
            let post = posts.create(NewPost::new("t", "c", None)).await.unwrap();
            assert_eq!(post.id, PostId::Seq(expected));
        }
    }

    #[tokio::test]
    async fn test_sqlite_list_pages() {
        let storage = sqlite_storage().await;
        let posts = storage.posts();

        assert!(posts.list(Page::default()).await.unwrap().is_empty());

        for i in 0..150 {
            posts
                .create(NewPost::new(format!("post {i}"), "body", None))
                .await
                .unwrap();
        }

        let capped = posts.list(Page::clamp(None, Some(500))).await.unwrap();
        assert_eq!(capped.len(), 100);
        assert_eq!(capped[0].id, PostId::Seq(1));

        let window = posts.list(Page::clamp(Some(10), Some(5))).await.unwrap();
        let ids: Vec<_> = window.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, (11..=15).map(PostId::Seq).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let opts = ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .to_owned();
        let db = Database::connect(opts).await.unwrap();
        let repo = SqlPostRepository::new(db);

        repo.ensure_schema().await.unwrap();
        repo.create(NewPost::new("kept", "across", None))
            .await
            .unwrap();

        // Running the startup schema step again must not drop existing rows.
        repo.ensure_schema().await.unwrap();
        assert_eq!(repo.list(Page::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_close_shuts_the_shared_pool() {
        let storage = sqlite_storage().await;
        let posts = storage.posts();
        posts.create(NewPost::new("t", "c", None)).await.unwrap();

        // Handlers and the lifecycle share one pool; closing it is visible to both.
        storage.close().await.unwrap();
        assert!(posts.list(Page::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_open_without_config_is_in_memory() {
        let storage = Storage::open(None).await.unwrap();
        assert_eq!(storage.backend(), StorageBackend::Memory);
        storage.close().await.unwrap();
    }

    #[test]
    fn test_backend_from_url() {
        assert_eq!(
            DatabaseConfig::new("postgres://localhost/blog").backend(),
            StorageBackend::Relational
        );
        assert_eq!(
            DatabaseConfig::new("sqlite://./data.db?mode=rwc").backend(),
            StorageBackend::Relational
        );
        assert_eq!(
            DatabaseConfig::new("mongodb://localhost:27017").backend(),
            StorageBackend::Document
        );
        assert_eq!(
            DatabaseConfig::new("mongodb+srv://cluster.example.net/blog").backend(),
            StorageBackend::Document
        );
    }
}
