/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status stored for a freshly added task
pub const TASK_PENDING: &str = "pending";

/// Status stored once a task is done
pub const TASK_COMPLETED: &str = "completed";

/// User preference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub key: String,
    pub value: String,
}

/// A task on the user's list
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: String,
}
