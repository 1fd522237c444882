/// jarvis library
///
/// Personal-assistant command router: rules, knowledge, web search,
/// and local automation behind one `Router::resolve` call.

pub mod automation;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod intelligence;
pub mod server;
pub mod web;

// Re-exports for convenience
pub use config::Config;
pub use core::{Response, Router, Status};
pub use db::Database;
pub use error::{JarvisError, Result};
