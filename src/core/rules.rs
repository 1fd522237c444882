// Intent rules, in precedence order.
//
// Every predicate is a plain substring test on the normalized command.
// Overlaps between rules are resolved only by position in RULES, so moving
// an entry changes behavior ("open weather app" is a weather query, and
// "hey, call me Tony" renames the user instead of greeting them).

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Mode,
    Silence,
    Weather,
    Organize,
    Launch,
    Time,
    IdentityQuery,
    Capabilities,
    ExplicitSearch,
    Explain,
    Remember,
    AddTask,
    CompleteTask,
    ListTasks,
    CallMe,
    Status,
    Greeting,
    SelfDescription,
    Acknowledge,
}

pub const RULES: &[Rule] = &[
    Rule::Mode,
    Rule::Silence,
    Rule::Weather,
    Rule::Organize,
    Rule::Launch,
    Rule::Time,
    Rule::IdentityQuery,
    Rule::Capabilities,
    Rule::ExplicitSearch,
    Rule::Explain,
    Rule::Remember,
    Rule::AddTask,
    Rule::CompleteTask,
    Rule::ListTasks,
    Rule::CallMe,
    Rule::Status,
    Rule::Greeting,
    Rule::SelfDescription,
    Rule::Acknowledge,
];

/// A behavior switch: trigger phrases, the preferences it sets to "true",
/// and the confirmation read back to the user.
#[derive(Debug)]
pub struct ModePhrase {
    pub phrases: &'static [&'static str],
    pub preferences: &'static [&'static str],
    pub reply: &'static str,
}

pub const MODES: &[ModePhrase] = &[
    ModePhrase {
        phrases: &["activate full autonomous assistant mode", "full intelligent assistant mode"],
        preferences: &["mode_autonomous", "mode_proactive", "mode_voice", "mode_memory", "mode_auto_execute"],
        reply: "Full autonomous mode activated. I am now operating with memory, proactive reasoning, voice-style responses, and task execution. Standing by for directives.",
    },
    ModePhrase {
        phrases: &["continuous readiness state", "remain in continuous"],
        preferences: &["mode_continuous"],
        reply: "Continuous monitoring enabled. I will notify you of relevant events.",
    },
    ModePhrase {
        phrases: &["think through the task step-by-step", "think before responding"],
        preferences: &["mode_reasoning"],
        reply: "Step-by-step reasoning mode activated.",
    },
    ModePhrase {
        phrases: &["adapt your tone to my mood", "interact naturally like a human"],
        preferences: &["mode_human"],
        reply: "Human-like interaction mode enabled. I will adapt to your communication style.",
    },
    ModePhrase {
        phrases: &["don't wait for instructions", "suggest tasks"],
        preferences: &["mode_proactive"],
        reply: "Proactive mode engaged. I will suggest optimizations and automations.",
    },
    ModePhrase {
        phrases: &["execute it without asking", "when a task is clear and safe"],
        preferences: &["mode_auto_execute"],
        reply: "Auto-execution enabled. I will proceed with safe tasks autonomously.",
    },
    ModePhrase {
        phrases: &["continuously evaluate cpu", "optimize your windows system"],
        preferences: &["mode_system_monitor"],
        reply: "System optimization mode active. Monitoring hardware and performance.",
    },
    ModePhrase {
        phrases: &["respond as if speaking", "enter voice mode"],
        preferences: &["mode_voice"],
        reply: "Voice mode on. Responses will be brief and conversational.",
    },
    ModePhrase {
        phrases: &["remember my preferences", "remember my habits"],
        preferences: &["mode_memory"],
        reply: "Memory mode activated. I will track your preferences and interaction patterns.",
    },
];

const SILENCE: &[&str] = &["stop", "silence", "quiet", "be quiet", "shut up"];
const TIME: &[&str] = &["what time", "current time", "the time", "what day", "today's date"];
pub const LAUNCH_VERBS: &[&str] = &["open ", "launch ", "start "];
const IDENTITY: &[&str] = &[
    "what is your name",
    "what's your name",
    "who am i",
    "what is my name",
    "what's my name",
    "user name",
];
const CAPABILITIES: &[&str] = &[
    "what can you do",
    "what you can do",
    "what do you do",
    "help",
    "capabilities",
    "what are you capable",
];
pub const SEARCH_MARKERS: &[&str] = &["search for", "research", "look up", "google "];
const EXPLAIN: &[&str] = &["explain", "tell me more", "elaborate"];
const LIST_TASKS: &[&str] = &["list tasks", "my tasks"];
const STATUS: &[&str] = &["status", "report"];
const GREETINGS: &[&str] = &["hello", "hi", "hey", "greetings"];
const ACKNOWLEDGEMENTS: &[&str] = &[
    "ok",
    "okei",
    "okay",
    "sure",
    "fine",
    "yeah",
    "yep",
    "yes",
    "affirmative",
    "alright",
    "roger that",
    "cool",
];

static TASK_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:complete|finish) task\s*#?\s*(\d+)").expect("valid task number regex")
});

fn contains_any(command: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| command.contains(m))
}

/// First mode whose phrase appears in the command.
pub fn mode_for(command: &str) -> Option<&'static ModePhrase> {
    MODES.iter().find(|mode| contains_any(command, mode.phrases))
}

/// Task id from "complete task 3" / "finish task #3".
pub fn task_number(command: &str) -> Option<i64> {
    TASK_NUMBER
        .captures(command)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Launch target with only the leading verb removed.
pub fn launch_target(command: &str) -> Option<&str> {
    LAUNCH_VERBS
        .iter()
        .find_map(|verb| command.strip_prefix(verb))
        .map(str::trim)
}

/// Search query with every search marker removed.
pub fn search_query(command: &str) -> String {
    let mut query = command.to_string();
    for marker in SEARCH_MARKERS {
        query = query.replace(marker.trim_end(), " ");
    }
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Rule {
    /// Whether this rule claims the normalized (trimmed, lowercased) command.
    pub fn matches(self, command: &str) -> bool {
        match self {
            Rule::Mode => mode_for(command).is_some(),
            Rule::Silence => SILENCE.contains(&command),
            Rule::Weather => command.contains("weather"),
            Rule::Time => contains_any(command, TIME),
            Rule::Organize => command.contains("organize") && command.contains("downloads"),
            Rule::Launch => LAUNCH_VERBS.iter().any(|verb| command.starts_with(verb)),
            Rule::IdentityQuery => contains_any(command, IDENTITY),
            Rule::Capabilities => contains_any(command, CAPABILITIES),
            Rule::ExplicitSearch => contains_any(command, SEARCH_MARKERS),
            Rule::Explain => contains_any(command, EXPLAIN),
            Rule::Remember => command.contains("remember that"),
            Rule::AddTask => command.contains("add task"),
            Rule::CompleteTask => task_number(command).is_some(),
            Rule::ListTasks => contains_any(command, LIST_TASKS),
            Rule::CallMe => command.contains("call me"),
            Rule::Status => contains_any(command, STATUS),
            Rule::Greeting => contains_any(command, GREETINGS) || command == "jarvis",
            Rule::SelfDescription => command.contains("who are you"),
            Rule::Acknowledge => ACKNOWLEDGEMENTS.contains(&command),
        }
    }

    /// First rule in precedence order that claims the command.
    pub fn first_match(command: &str) -> Option<Rule> {
        RULES.iter().copied().find(|rule| rule.matches(command))
    }
}
