/// Database connection management with connection pooling
///
/// Provides a thread-safe connection pool to the SQLite memory file.

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of database connections in the pool
const MAX_CONNECTIONS: u32 = 5;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the database file and apply the schema.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Examples
    /// ```no_run
    /// use jarvis_lib::db::Database;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = Database::new("/tmp/jarvis/memory.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        db.initialize_schema().await?;
        debug!(path = %db.db_path.display(), "memory database ready");

        Ok(db)
    }

    /// Create a test database in memory
    ///
    /// Single connection, since every in-memory connection is its own database.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path: PathBuf::from(":memory:"),
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    /// Creates all required tables and indexes if they don't exist.
    async fn initialize_schema(&self) -> Result<()> {
        let schema = include_str!("../../database/schema.sql");

        for statement in schema_statements(schema) {
            sqlx::query(&statement).execute(self.pool.as_ref()).await?;
        }

        Ok(())
    }

    /// Get reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Row counts, for the CLI status line and debugging.
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let preference_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM preferences")
            .fetch_one(self.pool.as_ref())
            .await?;

        let pending_count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE status != 'completed'")
                .fetch_one(self.pool.as_ref())
                .await?;

        let task_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(DatabaseStats {
            total_preferences: preference_count.0,
            pending_tasks: pending_count.0,
            total_tasks: task_count.0,
        })
    }
}

/// Split a schema file into executable statements.
///
/// sqlx executes one statement per query. Comment lines go first so a `;`
/// inside a comment never splits a statement.
fn schema_statements(schema: &str) -> Vec<String> {
    let code = schema
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    code.split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub total_preferences: i64,
    pub pending_tasks: i64,
    pub total_tasks: i64,
}
