/// Error types for jarvis
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for jarvis operations
#[derive(Error, Debug)]
pub enum JarvisError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file moves, directory listing, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound HTTP errors (search provider, weather)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search provider returned something we could not use
    #[error("Search error: {0}")]
    Search(String),

    /// Weather source returned something we could not use
    #[error("Weather error: {0}")]
    Weather(String),

    /// Launching an app or website failed
    #[error("Launch error: {0}")]
    Launch(String),

    /// File organizing failed before any file was touched
    #[error("Automation error: {0}")]
    Automation(String),

    /// Host vitals could not be read
    #[error("Vitals error: {0}")]
    Vitals(String),

    /// Invalid command format or content
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for jarvis operations
pub type Result<T> = std::result::Result<T, JarvisError>;

impl JarvisError {
    /// Convert to a message that is safe to show the user.
    ///
    /// Never includes the underlying error text.
    pub fn user_message(&self) -> String {
        match self {
            JarvisError::Database(_) => {
                "My memory banks are unavailable right now. Please try again.".to_string()
            }
            JarvisError::Io(_) => {
                "I couldn't access the file system for that.".to_string()
            }
            JarvisError::Http(_) | JarvisError::Search(_) => {
                "I'm having trouble reaching my information sources right now. Please try again shortly."
                    .to_string()
            }
            JarvisError::Serialization(_) => {
                "I received data I couldn't understand.".to_string()
            }
            JarvisError::Config(_) => "I'm not configured correctly for that.".to_string(),
            JarvisError::Weather(_) => "Weather sensors offline.".to_string(),
            JarvisError::Launch(_) => "I couldn't launch that.".to_string(),
            JarvisError::Automation(_) => "That automation protocol failed.".to_string(),
            JarvisError::Vitals(_) => "System vitals are unavailable right now.".to_string(),
            JarvisError::InvalidCommand(_) => "I didn't understand that command.".to_string(),
            JarvisError::Generic(_) => "Something went wrong on my end.".to_string(),
        }
    }
}
