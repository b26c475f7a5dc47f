use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::RepositoryError;
use std::time::Duration;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Applied to every pooled connection so concurrent writers wait on the
/// file lock instead of failing immediately.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the SQLite file at `database_path` and makes sure
    /// the `user_profiles` table exists.
    pub fn new(database_path: &str) -> Result<Self, RepositoryError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: BUSY_TIMEOUT,
            }))
            .build(manager)
            .map_err(|e| RepositoryError::Failure(format!("failed to create pool: {}", e)))?;

        let database = Database { pool };
        database.initialize_schema()?;
        info!("SQLite database ready at {}", database_path);
        Ok(database)
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn initialize_schema(&self) -> Result<(), RepositoryError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;

        diesel::sql_query(schema::CREATE_USER_PROFILES)
            .execute(&mut conn)
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;
        Ok(())
    }
}
