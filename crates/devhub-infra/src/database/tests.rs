#[cfg(test)]
mod tests {
    use crate::database::entity::{notification, post, user};
    use crate::database::postgres_base::map_db_err;
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresNotificationRepository, PostgresPostRepository,
        PostgresUserRepository,
    };
    use devhub_core::Page;
    use devhub_core::domain::{Post, Role, User};
    use devhub_core::error::RepoError;
    use devhub_core::ports::{
        BaseRepository, CommentRepository, NotificationRepository, PostRepository, UserRepository,
    };
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn user_model(username: &str, role: &str) -> user::Model {
        let now = chrono::Utc::now();
        user::Model {
            id: uuid::Uuid::new_v4(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password: "$argon2id$stub".to_owned(),
            role: role.to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn post_model(user_id: uuid::Uuid, title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            user_id,
            title: title.to_owned(),
            description: "Description".to_owned(),
            post_type: "idea".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let user_id = uuid::Uuid::new_v4();
        let model = post_model(user_id, "Test Post");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.post_type, "idea");
        assert_eq!(post.user_id, user_id);
    }

    #[tokio::test]
    async fn test_find_posts_by_user_returns_rows_in_query_order() {
        let user_id = uuid::Uuid::new_v4();
        let newer = post_model(user_id, "Newer");
        let older = post_model(user_id, "Older");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![newer, older]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.find_by_user_id(user_id, Page::default()).await.unwrap();

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_find_user_by_username_parses_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model("root", "admin")]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let found: User = repo.find_by_username("root").await.unwrap().unwrap();

        assert_eq!(found.username, "root");
        assert_eq!(found.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_unknown_role_degrades_to_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model("odd", "superuser")]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let found = repo.find_by_username("odd").await.unwrap().unwrap();

        assert_eq!(found.role, Role::User);
    }

    #[tokio::test]
    async fn test_insert_user_returns_stored_row() {
        let model = user_model("ada", "user");
        let user: User = model.clone().into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let saved = repo.insert(user.clone()).await.unwrap();

        assert_eq!(saved.id, user.id);
        assert_eq!(saved.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_mark_all_read_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        let repo = PostgresNotificationRepository::new(db);
        let cleared = repo.mark_all_read(uuid::Uuid::new_v4()).await.unwrap();

        assert_eq!(cleared, 3);
    }

    #[tokio::test]
    async fn test_delete_comments_by_post_is_one_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 4,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db.clone());
        let removed = repo.delete_by_post_id(uuid::Uuid::new_v4()).await.unwrap();
        assert_eq!(removed, 4);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_find_notifications_keeps_kind() {
        let now = chrono::Utc::now();
        let to_user = uuid::Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![notification::Model {
                id: uuid::Uuid::new_v4(),
                to_user,
                from_user: uuid::Uuid::new_v4(),
                kind: "comment".to_owned(),
                read: false,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresNotificationRepository::new(db);
        let found = repo.find_for_user(to_user).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind.as_str(), "comment");
        assert!(!found[0].read);
    }

    #[test]
    fn test_record_not_updated_maps_to_not_found() {
        assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
        assert!(matches!(
            map_db_err(DbErr::Custom("boom".into())),
            RepoError::Query(_)
        ));
    }
}
