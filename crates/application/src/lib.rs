use domain::{RepositoryError, UserProfileRepository, UserProfileService};
use infrastructure::{Database, InMemoryUserProfileRepository, SqliteUserProfileRepository};
use std::sync::Arc;
use tracing::info;

/// Profile Application - wires a repository into the profile service
pub struct ProfileApp {
    pub profile_service: UserProfileService,
}

impl ProfileApp {
    /// SQLite-backed application using the file at `database_path`.
    pub fn new(database_path: &str) -> Result<Self, RepositoryError> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path)?;
        let pool = database.get_pool().clone();

        let profile_repository: Arc<dyn UserProfileRepository> =
            Arc::new(SqliteUserProfileRepository::new(pool));

        info!("profile store: sqlite ({})", database_path);
        Ok(Self::with_repository(profile_repository))
    }

    /// Application backed by a process-local store; nothing survives a restart.
    pub fn in_memory() -> Self {
        info!("profile store: in-memory");
        Self::with_repository(Arc::new(InMemoryUserProfileRepository::new()))
    }

    pub fn with_repository(profile_repository: Arc<dyn UserProfileRepository>) -> Self {
        Self {
            profile_service: UserProfileService::new(profile_repository),
        }
    }
}
