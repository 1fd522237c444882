/// Database module for jarvis
///
/// Persistent memory: user preferences and the task list.
/// Uses SQLite through sqlx with a small connection pool.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::{Database, DatabaseStats};
pub use models::*;
