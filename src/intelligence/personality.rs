// Personality overlay: jokes, empathy, enthusiasm, and the occasional sass.
//
// All randomness goes through RandomSource so tests can pin it down.

use crate::intelligence::sentiment::Sentiment;
use rand::seq::SliceRandom;
use rand::Rng;

/// Chance of an enthusiastic remark on positive input
pub const ENTHUSIASM_CHANCE: f64 = 0.3;

/// Chance of a sassy remark on neutral input
pub const SASS_CHANCE: f64 = 0.2;

pub const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "I would tell you a UDP joke, but you might not get it.",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "I told my computer I needed a break. It said: 'No problem, I'll go to sleep.'",
    "Why did the developer go broke? Because he used up all his cache.",
];

pub const EMPATHY: &[&str] = &[
    "That sounds rough. I'm here if you need anything.",
    "I'm sorry you're dealing with that. Want me to take something off your plate?",
    "Hang in there. Let's tackle this one step at a time.",
    "Deep breath. I've got your back.",
];

pub const ENTHUSIASM: &[&str] = &[
    "Love the energy! Let's keep it going.",
    "Excellent! That's what I like to hear.",
    "Fantastic. Today is shaping up nicely.",
];

pub const SASS: &[&str] = &[
    "Processing... with the enthusiasm of a Monday morning.",
    "Another request? I was just getting comfortable.",
    "Sure, because I have nothing better to do. Oh wait, I don't.",
    "I'll pretend that was a perfectly normal request.",
];

pub const REPETITION: &[&str] = &[
    "You just asked me that. Is there an echo in here?",
    "Déjà vu? I believe we just covered that.",
    "Same question, same me. Want me to try something different?",
];

pub const GRATITUDE: &[&str] = &[
    "You're welcome. Always happy to help.",
    "Anytime, that's what I'm here for.",
    "My pleasure.",
    "Don't mention it.",
];

const HUMOR_MARKERS: &[&str] = &["joke", "make me laugh", "something funny", "funny"];

/// Picks remarks and flips weighted coins
pub trait RandomSource: Send + Sync {
    /// One element of `options`; `""` only if `options` is empty.
    fn choose(&mut self, options: &[&'static str]) -> &'static str;

    /// True with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Uniform, unseeded randomness from the thread RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn choose(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut rand::thread_rng()).copied().unwrap_or("")
    }

    fn chance(&mut self, probability: f64) -> bool {
        rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Deterministic source for tests: always picks `index` (wrapped), and
/// behaves as if every roll came up `roll` on a 0..1 scale.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub index: usize,
    pub roll: f64,
}

#[cfg(test)]
impl FixedRandom {
    /// First option, and no probabilistic remark ever fires.
    pub fn quiet() -> Self {
        Self { index: 0, roll: 1.0 }
    }
}

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn choose(&mut self, options: &[&'static str]) -> &'static str {
        if options.is_empty() {
            return "";
        }
        options[self.index % options.len()]
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.roll < probability
    }
}

/// What the user seems to want from the personality layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Humor,
    Ordinary,
}

impl Mood {
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();
        if HUMOR_MARKERS.iter().any(|m| text.contains(m)) {
            Mood::Humor
        } else {
            Mood::Ordinary
        }
    }
}

pub struct Personality {
    rng: Box<dyn RandomSource>,
}

impl Default for Personality {
    fn default() -> Self {
        Self::new(Box::new(ThreadRandom))
    }
}

impl Personality {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// An override remark, or `None` to let the normal pipeline answer.
    pub fn personalize(&mut self, mood: Mood, sentiment: Sentiment) -> Option<String> {
        if mood == Mood::Humor {
            return Some(self.pick(JOKES));
        }

        match sentiment {
            Sentiment::Negative => Some(self.pick(EMPATHY)),
            Sentiment::Positive => self
                .rng
                .chance(ENTHUSIASM_CHANCE)
                .then(|| self.pick(ENTHUSIASM)),
            Sentiment::Neutral => self.rng.chance(SASS_CHANCE).then(|| self.pick(SASS)),
        }
    }

    /// Uniform pick from a remark pool.
    pub fn pick(&mut self, pool: &[&'static str]) -> String {
        self.rng.choose(pool).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personality(index: usize, roll: f64) -> Personality {
        Personality::new(Box::new(FixedRandom { index, roll }))
    }

    #[test]
    fn test_humor_always_jokes() {
        let mut p = personality(1, 1.0);
        assert_eq!(p.personalize(Mood::Humor, Sentiment::Negative), Some(JOKES[1].to_string()));
    }

    #[test]
    fn test_negative_always_empathizes() {
        let mut p = personality(2, 1.0);
        assert_eq!(
            p.personalize(Mood::Ordinary, Sentiment::Negative),
            Some(EMPATHY[2].to_string())
        );
    }

    #[test]
    fn test_positive_uses_thirty_percent_gate() {
        // 0.25 is under 0.3 but over 0.2
        let mut p = personality(0, 0.25);
        assert_eq!(
            p.personalize(Mood::Ordinary, Sentiment::Positive),
            Some(ENTHUSIASM[0].to_string())
        );

        let mut p = personality(0, 0.35);
        assert_eq!(p.personalize(Mood::Ordinary, Sentiment::Positive), None);
    }

    #[test]
    fn test_neutral_uses_twenty_percent_gate() {
        let mut p = personality(3, 0.1);
        assert_eq!(p.personalize(Mood::Ordinary, Sentiment::Neutral), Some(SASS[3].to_string()));

        let mut p = personality(3, 0.25);
        assert_eq!(p.personalize(Mood::Ordinary, Sentiment::Neutral), None);
    }

    #[test]
    fn test_mood_detection() {
        assert_eq!(Mood::detect("Tell me a JOKE"), Mood::Humor);
        assert_eq!(Mood::detect("make me laugh please"), Mood::Humor);
        assert_eq!(Mood::detect("open youtube"), Mood::Ordinary);
    }

    #[test]
    fn test_fixed_random_wraps_index() {
        let mut rng = FixedRandom { index: 7, roll: 0.0 };
        assert_eq!(rng.choose(&["a", "b", "c"]), "b");
        assert_eq!(rng.choose(&[]), "");
    }

    #[test]
    fn test_thread_random_picks_member() {
        let mut rng = ThreadRandom;
        let pick = rng.choose(GRATITUDE);
        assert!(GRATITUDE.contains(&pick));
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }
}
