/// Response types returned by the router
///
/// The JSON shape is the wire contract of the `/command` endpoint.

use serde::{Deserialize, Serialize};

/// Outcome of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
    #[default]
    Unknown,
    Clarify,
    /// Internal signal from the reasoning stage; never returned by the router.
    NeedsSearch,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::Error => "error",
            Status::Unknown => "unknown",
            Status::Clarify => "clarify",
            Status::NeedsSearch => "needs_search",
        };
        write!(f, "{}", s)
    }
}

/// A web page an answer was drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// What the router hands back for every command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(Status::Unknown, "I didn't understand that command.")
    }
}

impl Response {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            sources: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Status::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Status::Error, message)
    }

    pub fn clarify(message: impl Into<String>) -> Self {
        Self::new(Status::Clarify, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
