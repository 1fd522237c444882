/// Keyword sentiment scoring
///
/// +1 per positive word, -1 per negative word, matched as whole words.

use serde::{Deserialize, Serialize};

const POSITIVE: &[&str] = &[
    "good", "great", "awesome", "amazing", "love", "happy", "excellent", "fantastic", "nice",
    "wonderful", "brilliant", "glad", "excited", "perfect", "beautiful",
];

const NEGATIVE: &[&str] = &[
    "bad", "sad", "terrible", "awful", "hate", "angry", "upset", "tired", "frustrated",
    "annoyed", "stressed", "worst", "horrible", "depressed", "lonely",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Net keyword score; positive words add one, negative words subtract one.
pub fn net_score(text: &str) -> i32 {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if POSITIVE.contains(&word) {
                1
            } else if NEGATIVE.contains(&word) {
                -1
            } else {
                0
            }
        })
        .sum()
}

pub fn score(text: &str) -> Sentiment {
    match net_score(text) {
        n if n > 0 => Sentiment::Positive,
        n if n < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_and_negative() {
        assert_eq!(score("this is awesome, I love it"), Sentiment::Positive);
        assert_eq!(score("I'm so tired and frustrated"), Sentiment::Negative);
        assert_eq!(score("open spotify"), Sentiment::Neutral);
    }

    #[test]
    fn test_tie_is_neutral() {
        assert_eq!(net_score("good day, bad night"), 0);
        assert_eq!(score("good day, bad night"), Sentiment::Neutral);
    }

    #[test]
    fn test_whole_words_only() {
        // "badge" is not "bad", "goodbye" is not "good"
        assert_eq!(net_score("my badge says goodbye"), 0);
    }

    #[test]
    fn test_counts_repeats() {
        assert_eq!(net_score("great great great"), 3);
    }
}
