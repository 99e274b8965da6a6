//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::Paginator;
use yatube_core::ports::{GroupRepository, PostRepository, UserRepository};
use yatube_infra::InMemoryDatabase;

#[cfg(feature = "postgres")]
use yatube_infra::database::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;
use crate::middleware::session::SessionSettings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub paginator: Paginator,
    pub session: SessionSettings,
    /// `"postgres"` or `"memory"`, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Every repository backed by one in-memory store.
    pub fn in_memory(
        db: Arc<InMemoryDatabase>,
        paginator: Paginator,
        session: SessionSettings,
    ) -> Self {
        Self {
            users: db.clone(),
            groups: db.clone(),
            posts: db,
            paginator,
            session,
            storage: "memory",
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let paginator = config.paginator();
        let session = config.session.clone();

        #[cfg(feature = "postgres")]
        if let Some(db_config) = config.database.as_ref() {
            match yatube_infra::database::connect(db_config).await {
                Ok(conn) => {
                    let conn = Arc::new(conn);
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn)),
                        paginator,
                        session,
                        storage: "postgres",
                    };
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

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repository");

        tracing::info!("Application state initialized (memory)");
        Self::in_memory(Arc::new(InMemoryDatabase::new()), paginator, session)
    }
}
