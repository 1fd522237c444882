/// Fallback chain for questions no rule claimed
///
/// Reasoning first, then the web, then a generic reply naming the subject.
/// Context (last topic / answer / search) is only written when one of the
/// first two stages succeeds.

use crate::core::memory::ConversationMemory;
use crate::core::{Response, Status};
use crate::intelligence::ReasoningEngine;
use crate::web::WebSearchAdapter;
use tracing::{debug, info};

pub const INTERROGATIVES: &[&str] = &["what", "who", "how", "why", "where", "when", "define", "explain"];

// Longest first so "what is" wins over "what"
const QUESTION_PREFIXES: &[&str] = &[
    "tell me about",
    "what are",
    "what is",
    "what's",
    "who was",
    "who is",
    "how does",
    "how do",
    "how to",
    "why is",
    "why do",
    "where is",
    "when is",
    "when did",
    "define",
    "explain",
    "what",
    "who",
    "how",
    "why",
    "where",
    "when",
];

pub fn is_question(command: &str) -> bool {
    INTERROGATIVES.iter().any(|m| command.contains(m))
}

/// What the question is about, with the question words and trailing
/// punctuation removed.
pub fn subject_of(command: &str) -> String {
    let mut subject = command.trim();
    if let Some(rest) = QUESTION_PREFIXES
        .iter()
        .find_map(|prefix| subject.strip_prefix(prefix))
    {
        subject = rest;
    }

    let subject = subject.trim().trim_end_matches(['?', '.', '!']).trim();
    if subject.is_empty() {
        command.trim().to_string()
    } else {
        subject.to_string()
    }
}

pub fn generic_subject_message(command: &str) -> Response {
    Response::new(
        Status::Unknown,
        format!(
            "I understand you're asking about {}. I couldn't find a confident answer right now, could you rephrase or ask me to research it?",
            subject_of(command)
        ),
    )
}

/// Run the chain for `command` (already normalized).
pub async fn resolve_fallback(
    reasoning: &ReasoningEngine,
    search: &WebSearchAdapter,
    memory: &mut ConversationMemory,
    command: &str,
) -> Response {
    let topic = subject_of(command);

    let answer = reasoning.answer(command, memory.last_topic());
    if answer.is_success() {
        debug!(source = answer.source, "answered by reasoning");
        memory.remember_answer(&topic, &answer.message, &[]);
        return Response::success(answer.message);
    }

    info!(query = command, "reasoning needs search");
    let found = search.search(command).await;
    if found.response.is_success() {
        memory.remember_answer(&topic, &found.response.message, &found.results);
        return found.response;
    }

    debug!(query = command, "search inconclusive, generic reply");
    generic_subject_message(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_question() {
        assert!(is_question("who won the world cup"));
        assert!(is_question("define entropy"));
        assert!(!is_question("banana bread"));
    }

    #[test]
    fn test_subject_of() {
        assert_eq!(subject_of("what is a monad?"), "a monad");
        assert_eq!(subject_of("who won the world cup"), "won the world cup");
        assert_eq!(subject_of("tell me about tokio"), "tokio");
        assert_eq!(subject_of("why?"), "why?");
        assert_eq!(subject_of("the meaning of life"), "the meaning of life");
    }

    #[test]
    fn test_generic_subject_message() {
        let response = generic_subject_message("where is atlantis?");
        assert_eq!(response.status, Status::Unknown);
        assert!(response.message.starts_with("I understand you're asking about atlantis."));
    }
}
