/// Answer formatting
///
/// Turns cleaned snippets into one message shaped by what kind of question
/// was asked.

use crate::core::Source;
use crate::web::SearchResult;

/// Characters kept from the leading snippet
pub const PRIMARY_CAP: usize = 400;
/// Characters kept from the second snippet, short form
pub const SECONDARY_CAP: usize = 200;
/// Characters kept from the second snippet, long form (how-to, why)
pub const SECONDARY_CAP_LONG: usize = 250;
/// Sources attached to a search answer
pub const MAX_SOURCES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    Definition,
    HowTo,
    Who,
    Why,
    General,
}

impl QueryShape {
    /// First matching shape in declaration order.
    pub fn classify(query: &str) -> Self {
        let query = query.trim().to_lowercase();

        if ["what is", "what are", "define", "meaning of", "definition"]
            .iter()
            .any(|m| query.contains(m))
        {
            QueryShape::Definition
        } else if ["how to", "how do", "how does", "how can"]
            .iter()
            .any(|m| query.contains(m))
        {
            QueryShape::HowTo
        } else if ["who is", "who was", "who are"].iter().any(|m| query.contains(m)) {
            QueryShape::Who
        } else if query.starts_with("why") || query.contains(" why ") {
            QueryShape::Why
        } else {
            QueryShape::General
        }
    }

    fn secondary_cap(self) -> usize {
        match self {
            QueryShape::HowTo | QueryShape::Why => SECONDARY_CAP_LONG,
            _ => SECONDARY_CAP,
        }
    }
}

/// Cut to at most `max` characters, on a char boundary.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

/// One message from up to two snippets, shaped by `shape`.
///
/// Snippets are expected to be sanitized already; empty ones are skipped.
pub fn compose(shape: QueryShape, snippets: &[String]) -> String {
    let mut parts = snippets.iter().filter(|s| !s.is_empty());
    let Some(first) = parts.next() else {
        return String::new();
    };

    let first = truncate(first, PRIMARY_CAP);
    let second = parts.next().map(|s| truncate(s, shape.secondary_cap()));

    let lead = match shape {
        QueryShape::Definition | QueryShape::Who => first,
        QueryShape::HowTo => format!("Here's how it works: {}", first),
        QueryShape::Why => format!("The main reason: {}", first),
        QueryShape::General => format!("Here's what I found: {}", first),
    };

    match (shape, second) {
        (_, None) => lead,
        (QueryShape::Definition, Some(more)) => format!("{} Additionally, {}", lead, more),
        (QueryShape::HowTo, Some(more)) => format!("{} Also: {}", lead, more),
        (QueryShape::Why, Some(more)) => format!("{} Furthermore, {}", lead, more),
        (_, Some(more)) => format!("{} {}", lead, more),
    }
}

pub fn sources(results: &[SearchResult]) -> Vec<Source> {
    results
        .iter()
        .take(MAX_SOURCES)
        .map(|r| Source {
            title: r.title.clone(),
            url: r.url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_in_order() {
        assert_eq!(QueryShape::classify("What is Rust"), QueryShape::Definition);
        assert_eq!(QueryShape::classify("how to bake bread"), QueryShape::HowTo);
        assert_eq!(QueryShape::classify("who is ada lovelace"), QueryShape::Who);
        assert_eq!(QueryShape::classify("why do cats purr"), QueryShape::Why);
        assert_eq!(QueryShape::classify("rust borrow checker"), QueryShape::General);
        // definition markers are checked before who/why
        assert_eq!(QueryShape::classify("why and what is it"), QueryShape::Definition);
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo world", 5), "héllo...");
        assert_eq!(truncate("abc def", 4), "abc...");
    }

    #[test]
    fn test_compose_caps_lengths() {
        let long = "a".repeat(1000);
        let message = compose(QueryShape::Definition, &[long.clone(), long]);

        let (first, second) = message.split_once(" Additionally, ").unwrap();
        assert_eq!(first.len(), PRIMARY_CAP + 3);
        assert_eq!(second.len(), SECONDARY_CAP + 3);
    }

    #[test]
    fn test_compose_shapes() {
        let snippets = vec!["First.".to_string(), "Second.".to_string()];
        assert_eq!(compose(QueryShape::Who, &snippets), "First. Second.");
        assert_eq!(
            compose(QueryShape::HowTo, &snippets),
            "Here's how it works: First. Also: Second."
        );
        assert_eq!(
            compose(QueryShape::General, &snippets[..1]),
            "Here's what I found: First."
        );
        assert_eq!(compose(QueryShape::Why, &[]), "");
    }

    #[test]
    fn test_sources_capped_at_three() {
        let results: Vec<SearchResult> = (0..5)
            .map(|i| SearchResult {
                title: format!("t{}", i),
                url: format!("https://example.com/{}", i),
                snippet: String::new(),
            })
            .collect();

        let sources = sources(&results);
        assert_eq!(sources.len(), MAX_SOURCES);
        assert_eq!(sources[0].title, "t0");
    }
}
