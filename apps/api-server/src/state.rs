//! Application state - shared across all handlers.

use std::sync::Arc;

use devhub_core::ports::{
    CommentRepository, MessageRepository, NotificationRepository, PasswordService,
    PostRepository, ProfileRepository, TokenService, UserRepository,
};
use devhub_infra::database::DatabaseConfig;
use devhub_infra::memory::{
    InMemoryCommentRepository, InMemoryMessageRepository, InMemoryNotificationRepository,
    InMemoryPostRepository, InMemoryProfileRepository, InMemoryUserRepository,
};
use devhub_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
use devhub_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresMessageRepository,
    PostgresNotificationRepository, PostgresPostRepository, PostgresProfileRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        jwt: JwtConfig,
        passwords: Argon2PasswordService,
    ) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(&connections, jwt, passwords);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(jwt, passwords)
    }

    /// State backed by in-memory repositories. Data lives as long as the process.
    pub fn in_memory(jwt: JwtConfig, passwords: Argon2PasswordService) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(passwords),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(
        connections: &DatabaseConnections,
        jwt: JwtConfig,
        passwords: Argon2PasswordService,
    ) -> Self {
        let db = &connections.main;

        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            messages: Arc::new(PostgresMessageRepository::new(db.clone())),
            notifications: Arc::new(PostgresNotificationRepository::new(db.clone())),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(passwords),
        }
    }
}
