/// Intelligence module
///
/// Static knowledge, reasoning templates, and the sentiment/personality
/// overlay applied on top of computed answers.

pub mod follow_up;
pub mod knowledge;
pub mod personality;
pub mod reasoning;
pub mod sentiment;

pub use personality::{Mood, Personality, RandomSource, ThreadRandom};
pub use reasoning::{Answer, ReasoningEngine};
pub use sentiment::Sentiment;
