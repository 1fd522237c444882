/// Proactive follow-up suggestions
///
/// A successful answer can get one trailing suggestion keyed by what the
/// user asked about. First trigger in table order wins.

/// Suggestion with the keywords that trigger it
#[derive(Debug, Clone, Copy)]
pub struct FollowUp {
    pub triggers: &'static [&'static str],
    pub suggestion: &'static str,
}

pub const FOLLOW_UPS: &[FollowUp] = &[
    FollowUp {
        triggers: &["time"],
        suggestion: "Would you like the weather forecast as well?",
    },
    FollowUp {
        triggers: &["weather"],
        suggestion: "Shall I check your calendar for outdoor plans?",
    },
    FollowUp {
        triggers: &["status", "system"],
        suggestion: "I can run a full diagnostic if you'd like.",
    },
    FollowUp {
        triggers: &["music", "play"],
        suggestion: "Want me to adjust the volume?",
    },
];

/// Suggestion for a normalized command, if any trigger appears in it.
pub fn follow_up(command: &str) -> Option<&'static str> {
    FOLLOW_UPS
        .iter()
        .find(|f| f.triggers.iter().any(|t| command.contains(t)))
        .map(|f| f.suggestion)
}

/// `message` with the suggestion appended as a trailing sentence.
pub fn append_to(message: &str, command: &str) -> Option<String> {
    follow_up(command).map(|s| format!("{} {}", message.trim_end(), s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers() {
        assert_eq!(follow_up("what time is it"), Some(FOLLOW_UPS[0].suggestion));
        assert_eq!(follow_up("weather please"), Some(FOLLOW_UPS[1].suggestion));
        assert_eq!(follow_up("system report"), Some(FOLLOW_UPS[2].suggestion));
        assert_eq!(follow_up("play some music"), Some(FOLLOW_UPS[3].suggestion));
        assert_eq!(follow_up("open youtube"), None);
    }

    #[test]
    fn test_table_order_wins() {
        // both "time" and "weather" appear
        assert_eq!(follow_up("weather at this time"), Some(FOLLOW_UPS[0].suggestion));
    }

    #[test]
    fn test_append_keeps_primary_message() {
        let msg = append_to("It is 10:00.", "what time is it").unwrap();
        assert!(msg.starts_with("It is 10:00. "));
        assert!(msg.ends_with(FOLLOW_UPS[0].suggestion));
        assert!(append_to("Hi.", "hello").is_none());
    }
}
