/// Reasoning heuristics
///
/// Answers what it can from static knowledge and a few question templates.
/// Anything else comes back as `NeedsSearch` for the fallback chain.

use crate::core::Status;
use crate::intelligence::knowledge;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const SOURCE: &str = "reasoning";

const COMPARISONS: &[(&str, &str, &str)] = &[
    ("python", "javascript", "Python is primarily used for backend development, data science, and automation with simpler syntax. JavaScript is mainly used for frontend web development and runs in browsers, though it can also run on servers via Node.js. Python is interpreted and emphasizes readability, while JavaScript is event-driven and asynchronous."),
    ("machine learning", "deep learning", "Machine Learning is a broader field that includes various algorithms for learning from data, such as decision trees, random forests, and support vector machines. Deep Learning is a specialized subset that uses neural networks with multiple layers to automatically learn complex patterns, particularly effective for image recognition and natural language processing."),
    ("cpu", "gpu", "CPUs have fewer, more powerful cores optimized for sequential processing and general-purpose computing. GPUs have thousands of smaller cores designed for parallel processing, making them ideal for graphics rendering, AI training, and scientific computations that can be parallelized."),
    ("ai", "machine learning", "Artificial Intelligence is the broader concept of machines being able to carry out tasks in a smart way. Machine Learning is a specific subset of AI that focuses on the idea that machines can learn from data and improve from experience without being explicitly programmed for every scenario."),
];

const HOW_NEURAL_NETWORKS_WORK: &str = "Neural networks work by mimicking how the human brain processes information. They consist of layers of interconnected nodes (neurons). The input layer receives data, hidden layers process it through weighted connections, and the output layer produces predictions. During training, the network adjusts these weights through backpropagation, learning to recognize patterns by minimizing errors between predictions and actual results. This allows them to learn complex relationships in data for tasks like image recognition and language processing.";

const HOW_MACHINE_LEARNING_WORKS: &str = "Machine learning works by training algorithms on data to recognize patterns and make predictions. The process involves: 1) Collecting and preparing training data, 2) Choosing an appropriate algorithm, 3) Training the model by feeding it data and adjusting parameters to minimize errors, 4) Validating the model on new data, and 5) Using the trained model to make predictions on unseen data. The system improves its performance over time as it processes more examples.";

const WHY_PYTHON_POPULAR: &str = "Python is popular because of its simple, readable syntax that resembles natural language, making it easy to learn for beginners. It has extensive libraries for data science, web development, and automation. The language is versatile, working across different platforms, and has strong community support with abundant resources and documentation. Its interpreted nature allows for rapid development and testing.";

// "it", "that", "this" as whole words: the question is about the last topic
static PRONOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(it|that|this|they|them)\b").expect("valid pronoun regex"));

/// Result of a reasoning attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// `Success` or `NeedsSearch`
    pub status: Status,
    pub message: String,
    pub source: &'static str,
}

impl Answer {
    fn found(message: &str) -> Self {
        Self {
            status: Status::Success,
            message: message.to_string(),
            source: SOURCE,
        }
    }

    fn needs_search(message: &str) -> Self {
        Self {
            status: Status::NeedsSearch,
            message: message.to_string(),
            source: SOURCE,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReasoningEngine;

impl ReasoningEngine {
    pub fn new() -> Self {
        Self
    }

    /// Answer from knowledge and templates, or signal that a search is needed.
    ///
    /// Knowledge and comparisons only ever see the query itself. `last_topic`
    /// resolves pronouns for the how/why templates: with a last topic of
    /// "neural network", "how does it work" is answered as a neural network
    /// question.
    pub fn answer(&self, query: &str, last_topic: Option<&str>) -> Answer {
        let query = query.trim().to_lowercase();

        if let Some((keyword, text)) = knowledge::lookup(&query) {
            debug!(keyword, "knowledge hit");
            return Answer::found(text);
        }

        if query.contains("difference between") || query.contains("compare") {
            let answer = self.compare(&query);
            if answer.is_success() {
                return answer;
            }
        }

        let follow_up = self.with_topic(&query, last_topic);

        if follow_up.contains("how does") || follow_up.contains("how do") {
            let answer = self.how_it_works(&follow_up);
            if answer.is_success() {
                return answer;
            }
        }

        if follow_up.starts_with("why") {
            let answer = self.why(&follow_up);
            if answer.is_success() {
                return answer;
            }
        }

        Answer::needs_search("I need to research that for you.")
    }

    fn with_topic(&self, query: &str, last_topic: Option<&str>) -> String {
        match last_topic {
            Some(topic) if PRONOUN.is_match(query) => {
                debug!(topic, "resolved pronoun against last topic");
                format!("{} {}", query, topic.to_lowercase())
            }
            _ => query.to_string(),
        }
    }

    fn compare(&self, query: &str) -> Answer {
        COMPARISONS
            .iter()
            .find(|(a, b, _)| query.contains(a) && query.contains(b))
            .map(|(_, _, text)| Answer::found(text))
            .unwrap_or_else(|| Answer::needs_search("I need more information to compare those."))
    }

    fn how_it_works(&self, query: &str) -> Answer {
        if query.contains("work") {
            if query.contains("neural network") || query.contains("ai") {
                return Answer::found(HOW_NEURAL_NETWORKS_WORK);
            }
            if query.contains("machine learning") {
                return Answer::found(HOW_MACHINE_LEARNING_WORKS);
            }
        }
        Answer::needs_search("I need to research that mechanism.")
    }

    fn why(&self, query: &str) -> Answer {
        if query.contains("python") && query.contains("popular") {
            return Answer::found(WHY_PYTHON_POPULAR);
        }
        Answer::needs_search("I need to research that reason.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_answer_is_stable() {
        let engine = ReasoningEngine::new();
        let first = engine.answer("what is ai", None);
        let second = engine.answer("what is ai", None);

        assert!(first.is_success());
        assert_eq!(first, second);
        assert_eq!(first.source, "reasoning");
    }

    #[test]
    fn test_knowledge_wins_over_templates() {
        // "python" is in the knowledge table, so the comparison template never runs
        let engine = ReasoningEngine::new();
        let answer = engine.answer("difference between python and javascript", None);
        assert_eq!(answer.message, knowledge::lookup("python").unwrap().1);
    }

    #[test]
    fn test_unknown_question_needs_search() {
        let engine = ReasoningEngine::new();
        let answer = engine.answer("who won the world cup", None);
        assert_eq!(answer.status, Status::NeedsSearch);
    }

    #[test]
    fn test_comparison_requires_both_terms() {
        let engine = ReasoningEngine::new();
        assert_eq!(engine.compare("compare cpu and gpu").message, COMPARISONS[2].2);
        assert_eq!(engine.compare("compare cpu and tpu").status, Status::NeedsSearch);
    }

    #[test]
    fn test_how_it_works_templates() {
        let engine = ReasoningEngine::new();
        assert_eq!(
            engine.how_it_works("how do neural networks work").message,
            HOW_NEURAL_NETWORKS_WORK
        );
        assert_eq!(
            engine.how_it_works("how does machine learning work").message,
            HOW_MACHINE_LEARNING_WORKS
        );
        assert_eq!(
            engine.how_it_works("how does a bicycle work").status,
            Status::NeedsSearch
        );
    }

    #[test]
    fn test_why_template() {
        let engine = ReasoningEngine::new();
        assert_eq!(engine.why("why is python so popular").message, WHY_PYTHON_POPULAR);
        assert_eq!(engine.why("why is the sky blue").status, Status::NeedsSearch);
    }

    #[test]
    fn test_pronoun_uses_last_topic() {
        let engine = ReasoningEngine::new();

        let without = engine.answer("how does it work", None);
        assert_eq!(without.status, Status::NeedsSearch);

        let with = engine.answer("how does it work", Some("neural network"));
        assert_eq!(with.message, HOW_NEURAL_NETWORKS_WORK);

        let why = engine.answer("why is it so popular", Some("Python"));
        assert_eq!(why.message, WHY_PYTHON_POPULAR);
    }

    #[test]
    fn test_pronoun_never_reaches_knowledge() {
        let engine = ReasoningEngine::new();

        let answer = engine.answer("what is that building in paris", Some("python"));
        assert_eq!(answer.status, Status::NeedsSearch);

        let answer = engine.answer("tell me more about it", Some("sql"));
        assert_eq!(answer.status, Status::NeedsSearch);
    }
}
