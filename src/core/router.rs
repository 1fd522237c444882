/// Intent router
///
/// Turns one command into one `Response`. Conversation state lives here
/// for the life of the router; durable state goes through `MemoryStore`.

use crate::core::collaborators::{Automation, Launcher, MemoryStore, WeatherSource};
use crate::core::fallback;
use crate::core::memory::{ConversationMemory, Role};
use crate::core::rules::{self, Rule};
use crate::core::{Response, Status};
use crate::error::JarvisError;
use crate::intelligence::personality::{self, Mood, Personality};
use crate::intelligence::{follow_up, sentiment, ReasoningEngine};
use crate::web::WebSearchAdapter;
use chrono::Local;
use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

const DEFAULT_NAME: &str = "Boss";
const NAME_KEY: &str = "name";
const NOTE_KEY: &str = "note";
const VOICE_KEY: &str = "mode_voice";

const GRATITUDE_MARKERS: &[&str] = &["thank", "thx", "appreciate"];

const CAPABILITIES: &str = "I am JARVIS, your Personal AI OS. Here are my current protocols:\n\
    1. Research: Ask 'What is...' or 'Research...'\n\
    2. System: Say 'Status'\n\
    3. Automation: Say 'Organize downloads' or 'Open YouTube'\n\
    4. Memory: Say 'Remember that...', 'Add task...' or 'List tasks'\n\
    5. Weather: Ask 'What is the weather?'\n\
    6. Modes: Say 'Activate full autonomous assistant mode'";

// Extracted from the raw input so the user's casing survives
static CALL_ME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)call me\s+(.+)").expect("valid call-me regex"));
static REMEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)remember that\s*(.*)").expect("valid remember regex"));
static ADD_TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add task\s*:?\s*(.*)").expect("valid add-task regex"));

fn capture(re: &Regex, raw: &str) -> String {
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().trim_end_matches(['.', '!']).trim().to_string())
        .unwrap_or_default()
}

/// Everything the router talks to outside itself
pub struct Collaborators {
    pub store: Arc<dyn MemoryStore>,
    pub automation: Arc<dyn Automation>,
    pub launcher: Arc<dyn Launcher>,
    pub weather: Arc<dyn WeatherSource>,
    pub search: WebSearchAdapter,
}

pub struct Router {
    store: Arc<dyn MemoryStore>,
    automation: Arc<dyn Automation>,
    launcher: Arc<dyn Launcher>,
    weather: Arc<dyn WeatherSource>,
    search: WebSearchAdapter,
    reasoning: ReasoningEngine,
    personality: Personality,
    memory: ConversationMemory,
}

impl Router {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            store: collaborators.store,
            automation: collaborators.automation,
            launcher: collaborators.launcher,
            weather: collaborators.weather,
            search: collaborators.search,
            reasoning: ReasoningEngine::new(),
            personality: Personality::default(),
            memory: ConversationMemory::new(),
        }
    }

    /// Replace the personality (and its randomness).
    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Resolve one command. Never fails: collaborator errors come back as
    /// `error` responses with a stable message.
    pub async fn resolve(&mut self, command: &str) -> Response {
        let raw = command.trim();
        let normalized = raw.to_lowercase();

        self.memory.push(Role::User, normalized.as_str());
        let response = self.respond(&normalized, raw).await;
        self.memory.push(Role::Assistant, response.message.as_str());

        debug!(status = %response.status, "resolved");
        response
    }

    async fn respond(&mut self, command: &str, raw: &str) -> Response {
        if command.is_empty() {
            return Response::default();
        }

        if self.memory.previous_user_text() == Some(command) {
            debug!("repeated command");
            return Response::success(self.personality.pick(personality::REPETITION));
        }

        if GRATITUDE_MARKERS.iter().any(|m| command.contains(m)) {
            return Response::success(self.personality.pick(personality::GRATITUDE));
        }

        let mood = Mood::detect(command);
        let overlay = self.personality.personalize(mood, sentiment::score(command));
        if mood == Mood::Humor {
            if let Some(joke) = overlay {
                return Response::success(joke);
            }
        }

        let response = match Rule::first_match(command) {
            Some(rule) => {
                info!(?rule, "rule matched");
                self.apply(rule, command, raw).await
            }
            None => match overlay {
                Some(remark) => Response::success(remark),
                None if fallback::is_question(command) => {
                    fallback::resolve_fallback(
                        &self.reasoning,
                        &self.search,
                        &mut self.memory,
                        command,
                    )
                    .await
                }
                None => Response::success(format!(
                    "I heard '{}', but I don't have a protocol for that yet.",
                    command
                )),
            },
        };

        with_follow_up(response, command)
    }

    async fn apply(&mut self, rule: Rule, command: &str, raw: &str) -> Response {
        match rule {
            Rule::Mode => self.activate_mode(command).await,
            Rule::Silence => match self.store.set_preference(VOICE_KEY, "false").await {
                Ok(()) => Response::success("Audio stopped. I'll keep quiet."),
                Err(e) => failed("silence", &e),
            },
            Rule::Weather => self.weather_report().await,
            Rule::Time => time_report(command),
            Rule::Organize => self.organize().await,
            Rule::Launch => match rules::launch_target(command) {
                Some(target) if !target.is_empty() => self.launcher.smart_open(target),
                _ => Response::error("What should I open?"),
            },
            Rule::IdentityQuery => self.identity(command).await,
            Rule::Capabilities => Response::success(CAPABILITIES),
            Rule::ExplicitSearch => self.explicit_search(command).await,
            Rule::Explain => self.explain(),
            Rule::Remember => self.remember(raw).await,
            Rule::AddTask => self.add_task(raw).await,
            Rule::CompleteTask => self.complete_task(command).await,
            Rule::ListTasks => self.list_tasks().await,
            Rule::CallMe => self.call_me(raw).await,
            Rule::Status => Response::success("All systems nominal. Monitoring active."),
            Rule::Greeting => Response::success(format!("Yes, {}?", self.user_name().await)),
            Rule::SelfDescription => {
                Response::success("I am JARVIS, your Personal AI Operating System.")
            }
            Rule::Acknowledge => Response::success(format!("Got it, {}!", self.user_name().await)),
        }
    }

    async fn activate_mode(&self, command: &str) -> Response {
        let Some(mode) = rules::mode_for(command) else {
            return Response::default();
        };

        for key in mode.preferences {
            if let Err(e) = self.store.set_preference(key, "true").await {
                return failed("mode", &e);
            }
        }
        Response::success(mode.reply)
    }

    async fn weather_report(&self) -> Response {
        match self.weather.current().await {
            Ok(report) => Response::success(report.summary()).with_details(json!({
                "temp": report.temp,
                "condition": report.condition,
                "humidity": report.humidity,
                "wind": report.wind,
                "city": report.city,
            })),
            Err(e) => {
                warn!(error = %e, "weather failed");
                Response::error("Weather sensors offline.")
            }
        }
    }

    async fn organize(&self) -> Response {
        match self.automation.organize_downloads().await {
            Ok(report) => {
                let mut message = format!("Protocol Complete. Organized {} files.", report.moved_count);
                if report.error_count > 0 {
                    message.push_str(&format!(" {} could not be moved.", report.error_count));
                }
                Response::success(message).with_details(json!(report))
            }
            Err(e) => failed("organize", &e),
        }
    }

    async fn identity(&self, command: &str) -> Response {
        if command.contains("your name") {
            return Response::success("My name is JARVIS.");
        }

        match self.store.get_preference(NAME_KEY).await {
            Ok(Some(name)) if !name.is_empty() => Response::success(format!("You are {}.", name)),
            Ok(_) => Response::success(
                "I don't know your name yet. Tell me by saying 'call me' followed by your name.",
            ),
            Err(e) => failed("identity", &e),
        }
    }

    async fn explicit_search(&mut self, command: &str) -> Response {
        let query = rules::search_query(command);
        if query.is_empty() {
            return Response::error("What should I search for?");
        }

        let found = self.search.search(&query).await;
        if found.response.is_success() {
            self.memory
                .remember_answer(&query, &found.response.message, &found.results);
        }
        found.response
    }

    fn explain(&self) -> Response {
        if let Some(top) = self.memory.last_search().into_iter().next() {
            return Response::success(format!(
                "Based on your last search about '{}', here is a summary: {}",
                top.title, top.snippet
            ));
        }

        match (self.memory.last_topic(), self.memory.last_answer()) {
            (Some(topic), Some(answer)) => {
                Response::success(format!("Here's what I have on {}: {}", topic, answer))
            }
            _ => Response::error("I don't have any recent search results to explain."),
        }
    }

    async fn remember(&self, raw: &str) -> Response {
        let note = capture(&REMEMBER, raw);
        if note.is_empty() {
            return Response::error("What should I remember?");
        }

        match self.store.set_preference(NOTE_KEY, &note).await {
            Ok(()) => Response::success(format!("I have stored that in my memory banks: '{}'", note)),
            Err(e) => failed("remember", &e),
        }
    }

    async fn add_task(&self, raw: &str) -> Response {
        let description = capture(&ADD_TASK, raw);
        if description.is_empty() {
            return Response::error("What's the task?");
        }

        match self.store.add_task(&description).await {
            Ok(id) => {
                Response::success(format!("Task added: {}", description)).with_details(json!({ "id": id }))
            }
            Err(e) => failed("add task", &e),
        }
    }

    async fn complete_task(&self, command: &str) -> Response {
        let Some(id) = rules::task_number(command) else {
            return Response::error("Which task number should I complete?");
        };

        match self.store.complete_task(id).await {
            Ok(true) => Response::success(format!("Task {} marked complete.", id)),
            Ok(false) => Response::error(format!("I couldn't find an open task numbered {}.", id)),
            Err(e) => failed("complete task", &e),
        }
    }

    async fn list_tasks(&self) -> Response {
        match self.store.list_pending_tasks().await {
            Ok(tasks) if tasks.is_empty() => Response::success("You have no pending tasks."),
            Ok(tasks) => {
                let lines: Vec<String> = tasks
                    .iter()
                    .map(|t| format!("- [{}] {}", t.id, t.description))
                    .collect();
                Response::success(format!("Here are your pending tasks:\n{}", lines.join("\n")))
                    .with_details(json!(tasks))
            }
            Err(e) => failed("list tasks", &e),
        }
    }

    async fn call_me(&self, raw: &str) -> Response {
        let name = capture(&CALL_ME, raw);
        if name.is_empty() {
            return Response::error("What should I call you?");
        }

        match self.store.set_preference(NAME_KEY, &name).await {
            Ok(()) => {
                info!(name = %name, "user renamed");
                Response::success(format!("Understood. I will call you {} from now on.", name))
            }
            Err(e) => failed("call me", &e),
        }
    }

    async fn user_name(&self) -> String {
        match self.store.get_preference(NAME_KEY).await {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => DEFAULT_NAME.to_string(),
            Err(e) => {
                warn!(error = %e, "could not read name preference");
                DEFAULT_NAME.to_string()
            }
        }
    }
}

fn failed(action: &str, error: &JarvisError) -> Response {
    warn!(action, error = %error, "collaborator failed");
    Response::error(error.user_message())
}

fn time_report(command: &str) -> Response {
    let now = Local::now();
    let message = if command.contains("time") {
        format!("It is {}.", now.format("%-I:%M %p"))
    } else {
        format!("Today is {}.", now.format("%A, %B %-d, %Y"))
    };
    Response::success(message).with_details(json!({ "iso": now.to_rfc3339() }))
}

fn with_follow_up(mut response: Response, command: &str) -> Response {
    if response.status == Status::Success {
        if let Some(message) = follow_up::append_to(&response.message, command) {
            response.message = message;
        }
    }
    response
}
