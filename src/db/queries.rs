/// SQL query functions for database operations
///
/// Preferences are a plain key/value table; tasks carry a status that
/// moves from `pending` to `completed`.

use crate::core::collaborators::MemoryStore;
use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::Row;

impl Database {
    /// Get a preference value
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let pref = sqlx::query_as::<_, Preference>("SELECT key, value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(pref.map(|p| p.value))
    }

    /// Set a preference, replacing any previous value
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Add a pending task
    ///
    /// # Returns
    /// * `Ok(i64)` - The new task ID
    pub async fn add_task(&self, description: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO tasks (description, status) VALUES (?, ?) RETURNING id")
            .bind(description)
            .bind(TASK_PENDING)
            .fetch_one(self.pool())
            .await?;

        Ok(result.get(0))
    }

    /// Tasks that are not completed, oldest first
    pub async fn list_pending_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, description, status FROM tasks WHERE status != ? ORDER BY id ASC",
        )
        .bind(TASK_COMPLETED)
        .fetch_all(self.pool())
        .await?;

        Ok(tasks)
    }

    /// Mark a task completed
    ///
    /// # Returns
    /// * `Ok(true)` - A pending task with that ID existed and is now completed
    /// * `Ok(false)` - No pending task with that ID
    pub async fn complete_task(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ? AND status != ?")
            .bind(TASK_COMPLETED)
            .bind(id)
            .bind(TASK_COMPLETED)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MemoryStore for Database {
    async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        Database::get_preference(self, key).await
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        Database::set_preference(self, key, value).await
    }

    async fn add_task(&self, description: &str) -> Result<i64> {
        Database::add_task(self, description).await
    }

    async fn list_pending_tasks(&self) -> Result<Vec<Task>> {
        Database::list_pending_tasks(self).await
    }

    async fn complete_task(&self, id: i64) -> Result<bool> {
        Database::complete_task(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preferences() {
        let db = Database::new_test().await.unwrap();

        db.set_preference("test_key", "test_value").await.unwrap();

        let value = db.get_preference("test_key").await.unwrap();
        assert_eq!(value, Some("test_value".to_string()));
    }

    #[tokio::test]
    async fn test_preference_overwrite() {
        let db = Database::new_test().await.unwrap();

        db.set_preference("name", "Boss").await.unwrap();
        db.set_preference("name", "Arish").await.unwrap();

        assert_eq!(db.get_preference("name").await.unwrap(), Some("Arish".to_string()));
        assert_eq!(db.get_preference("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_and_list_tasks() {
        let db = Database::new_test().await.unwrap();

        let first = db.add_task("buy milk").await.unwrap();
        let second = db.add_task("call mom").await.unwrap();
        assert!(second > first);

        let tasks = db.list_pending_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "buy milk");
        assert_eq!(tasks[0].status, TASK_PENDING);
        assert_eq!(tasks[1].description, "call mom");
    }

    #[tokio::test]
    async fn test_complete_task() {
        let db = Database::new_test().await.unwrap();

        let id = db.add_task("write report").await.unwrap();
        db.add_task("water plants").await.unwrap();

        assert!(db.complete_task(id).await.unwrap());
        // Already completed
        assert!(!db.complete_task(id).await.unwrap());
        // Never existed
        assert!(!db.complete_task(9999).await.unwrap());

        let tasks = db.list_pending_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "water plants");
    }
}
