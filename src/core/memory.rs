// Conversation memory: what was said recently, and what we last looked up.
//
// Lives as long as the router does. Nothing here is persisted; durable
// preferences and tasks go through the MemoryStore collaborator instead.

use crate::web::SearchResult;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Turns kept in history; the oldest is evicted first.
pub const MAX_HISTORY: usize = 10;

pub const LAST_SEARCH: &str = "last_search";
pub const LAST_TOPIC: &str = "last_topic";
pub const LAST_ANSWER: &str = "last_answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct ConversationMemory {
    history: VecDeque<ConversationTurn>,
    context: HashMap<String, serde_json::Value>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.history.push_back(ConversationTurn {
            role,
            text: text.into(),
        });
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }

    /// Turns in arrival order, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The user turn before the most recent one.
    ///
    /// Called after the current command has been pushed, so the newest
    /// user turn is the command itself and gets skipped.
    pub fn previous_user_text(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .filter(|turn| turn.role == Role::User)
            .nth(1)
            .map(|turn| turn.text.as_str())
    }

    pub fn set_context(&mut self, key: &str, value: serde_json::Value) {
        self.context.insert(key.to_string(), value);
    }

    pub fn get_context(&self, key: &str) -> Option<&serde_json::Value> {
        self.context.get(key)
    }

    /// Remember a successful answer so follow-ups can refer back to it.
    pub fn remember_answer(&mut self, topic: &str, answer: &str, results: &[SearchResult]) {
        self.set_context(LAST_TOPIC, serde_json::Value::String(topic.to_string()));
        self.set_context(LAST_ANSWER, serde_json::Value::String(answer.to_string()));
        if let Ok(value) = serde_json::to_value(results) {
            self.set_context(LAST_SEARCH, value);
        }
    }

    pub fn last_search(&self) -> Vec<SearchResult> {
        self.get_context(LAST_SEARCH)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    pub fn last_topic(&self) -> Option<&str> {
        self.get_context(LAST_TOPIC).and_then(|v| v.as_str())
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.get_context(LAST_ANSWER).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut memory = ConversationMemory::new();

        for i in 0..25 {
            memory.push(Role::User, format!("turn {}", i));
            assert!(memory.len() <= MAX_HISTORY);
        }

        let texts: Vec<&str> = memory.history().map(|t| t.text.as_str()).collect();
        assert_eq!(texts.len(), MAX_HISTORY);
        assert_eq!(texts[0], "turn 15");
        assert_eq!(texts[9], "turn 24");
    }

    #[test]
    fn test_previous_user_text_skips_current_and_assistant() {
        let mut memory = ConversationMemory::new();
        assert_eq!(memory.previous_user_text(), None);

        memory.push(Role::User, "status");
        memory.push(Role::Assistant, "All systems nominal.");
        assert_eq!(memory.previous_user_text(), None);

        memory.push(Role::User, "status");
        assert_eq!(memory.previous_user_text(), Some("status"));
    }

    #[test]
    fn test_remember_answer() {
        let mut memory = ConversationMemory::new();
        assert!(memory.last_search().is_empty());
        assert_eq!(memory.last_topic(), None);

        let results = vec![SearchResult {
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org".to_string(),
            snippet: "A language empowering everyone.".to_string(),
        }];
        memory.remember_answer("rust", "Rust is a language.", &results);

        assert_eq!(memory.last_topic(), Some("rust"));
        assert_eq!(memory.last_answer(), Some("Rust is a language."));
        assert_eq!(memory.last_search(), results);
    }
}
