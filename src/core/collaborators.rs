/// Interfaces the router consumes
///
/// Everything with side effects outside the process sits behind one of
/// these traits, so the router can be driven with fakes in tests.

use crate::core::Response;
use crate::db::Task;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Durable preferences and tasks
#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn get_preference(&self, key: &str) -> Result<Option<String>>;
    async fn set_preference(&self, key: &str, value: &str) -> Result<()>;
    async fn add_task(&self, description: &str) -> Result<i64>;
    async fn list_pending_tasks(&self) -> Result<Vec<Task>>;
    async fn complete_task(&self, id: i64) -> Result<bool>;
}

/// Counts from one organize run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeReport {
    pub moved_count: usize,
    pub error_count: usize,
}

/// File automation
#[async_trait]
pub trait Automation: Send + Sync {
    /// Move loose files into per-category folders.
    ///
    /// Per-file failures are counted, not returned; an `Err` means nothing
    /// could be attempted at all.
    async fn organize_downloads(&self) -> Result<OrganizeReport>;
}

/// Desktop app / website launcher
pub trait Launcher: Send + Sync {
    /// Returns `success`, `error`, or `clarify`. Never acts on a `clarify`.
    fn smart_open(&self, name: &str) -> Response;
}

/// Current conditions at the user's location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temp: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
}

impl WeatherReport {
    pub fn summary(&self) -> String {
        format!(
            "Current weather in {}: {}°C, {}. Humidity: {}%. Wind: {} km/h.",
            self.city, self.temp, self.condition, self.humidity, self.wind
        )
    }
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> Result<WeatherReport>;
}
