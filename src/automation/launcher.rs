/// App and website launcher
///
/// Resolves a spoken name against three static tables: desktop apps,
/// websites, and bundles (named groups of the other two). Names found in
/// both the app and website tables are ambiguous and are never opened.

use crate::core::{Launcher, Response};
use crate::error::{JarvisError, Result};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::process::{Command, Stdio};
use tracing::{info, warn};

pub const DESKTOP_APPS: &[(&str, &str)] = &[
    ("vscode", "code"),
    ("vs code", "code"),
    ("code", "code"),
    ("chrome", "google-chrome"),
    ("google chrome", "google-chrome"),
    ("notepad", "gedit"),
    ("text editor", "gedit"),
    ("calculator", "gnome-calculator"),
    ("task manager", "gnome-system-monitor"),
    ("terminal", "x-terminal-emulator"),
    ("command prompt", "x-terminal-emulator"),
    ("file explorer", "nautilus"),
    ("explorer", "nautilus"),
    ("settings", "gnome-control-center"),
    ("spotify", "spotify"),
    ("discord", "discord"),
    ("steam", "steam"),
    ("word", "libreoffice --writer"),
    ("excel", "libreoffice --calc"),
    ("powerpoint", "libreoffice --impress"),
    ("outlook", "thunderbird"),
];

pub const WEBSITES: &[(&str, &str)] = &[
    ("gmail", "https://mail.google.com"),
    ("youtube", "https://www.youtube.com"),
    ("whatsapp", "https://web.whatsapp.com"),
    ("whatsapp web", "https://web.whatsapp.com"),
    ("chatgpt", "https://chat.openai.com"),
    ("github", "https://github.com"),
    ("figma", "https://www.figma.com"),
    ("linkedin", "https://www.linkedin.com"),
    ("stackoverflow", "https://stackoverflow.com"),
    ("stack overflow", "https://stackoverflow.com"),
    ("google drive", "https://drive.google.com"),
    ("drive", "https://drive.google.com"),
    ("twitter", "https://twitter.com"),
    ("x", "https://twitter.com"),
    ("instagram", "https://www.instagram.com"),
    ("facebook", "https://www.facebook.com"),
    ("reddit", "https://www.reddit.com"),
    ("netflix", "https://www.netflix.com"),
    ("amazon", "https://www.amazon.com"),
    ("google", "https://www.google.com"),
    ("outlook", "https://outlook.live.com"),
];

pub const BUNDLES: &[(&str, &[&str])] = &[
    ("coding setup", &["vscode", "github", "stackoverflow"]),
    ("work dashboard", &["gmail", "google drive", "linkedin"]),
    ("entertainment mode", &["youtube", "spotify", "netflix"]),
    ("study setup", &["youtube", "google drive", "notepad"]),
];

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
}

/// Starts processes on the host. Swapped out in tests.
pub trait Spawner: Send + Sync {
    /// Run a command line like `"libreoffice --calc"` detached.
    fn launch(&self, command: &str) -> Result<()>;

    /// Open a URL in the default browser.
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl SystemSpawner {
    fn spawn(program: &str, args: &[&str]) -> Result<()> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

impl Spawner for SystemSpawner {
    fn launch(&self, command: &str) -> Result<()> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| JarvisError::Launch("empty command".to_string()))?;
        let args: Vec<&str> = parts.collect();
        Self::spawn(program, &args)
    }

    fn open_url(&self, url: &str) -> Result<()> {
        if cfg!(target_os = "macos") {
            Self::spawn("open", &[url])
        } else if cfg!(target_os = "windows") {
            Self::spawn("cmd", &["/C", "start", "", url])
        } else {
            Self::spawn("xdg-open", &[url])
        }
    }
}

pub struct AppLauncher {
    spawner: Box<dyn Spawner>,
}

impl Default for AppLauncher {
    fn default() -> Self {
        Self::new(Box::new(SystemSpawner))
    }
}

impl AppLauncher {
    pub fn new(spawner: Box<dyn Spawner>) -> Self {
        Self { spawner }
    }

    fn launch_desktop_app(&self, name: &str, command: &str) -> Response {
        match self.spawner.launch(command) {
            Ok(()) => {
                info!(app = name, "launched");
                Response::success(format!("Launched {}. Done, Boss.", name))
            }
            Err(e) => {
                warn!(app = name, error = %e, "launch failed");
                Response::error(format!("Failed to launch {}.", name))
            }
        }
    }

    fn open_website(&self, name: &str, url: &str) -> Response {
        match self.spawner.open_url(url) {
            Ok(()) => {
                info!(site = name, url, "opened");
                Response::success(format!("Opened {}. Done, Boss.", name))
            }
            Err(e) => {
                warn!(site = name, error = %e, "open failed");
                Response::error(format!("Failed to open {}.", name))
            }
        }
    }

    fn launch_bundle(&self, name: &str, items: &[&str]) -> Response {
        let opened = items
            .iter()
            .map(|item| {
                if let Some(command) = lookup(DESKTOP_APPS, item) {
                    self.launch_desktop_app(item, command)
                } else if let Some(url) = lookup(WEBSITES, item) {
                    self.open_website(item, url)
                } else {
                    Response::error(format!("Unknown item: {}", item))
                }
            })
            .filter(Response::is_success)
            .count();

        Response::success(format!(
            "Launched {}: {}/{} items opened. Done, Boss.",
            name,
            opened,
            items.len()
        ))
    }

    /// Closest known name to an unrecognized target.
    pub fn suggest(&self, target: &str) -> Option<&'static str> {
        let matcher = SkimMatcherV2::default();
        DESKTOP_APPS
            .iter()
            .map(|(name, _)| *name)
            .chain(WEBSITES.iter().map(|(name, _)| *name))
            .chain(BUNDLES.iter().map(|(name, _)| *name))
            .filter_map(|name| matcher.fuzzy_match(name, target).map(|score| (score, name)))
            .max_by_key(|(score, _)| *score)
            .map(|(_, name)| name)
    }
}

impl Launcher for AppLauncher {
    fn smart_open(&self, name: &str) -> Response {
        let target = name.trim().to_lowercase();
        let app = lookup(DESKTOP_APPS, &target);
        let site = lookup(WEBSITES, &target);

        match (app, site) {
            (Some(_), Some(_)) => Response::clarify(format!(
                "'{}' exists as both a desktop app and website. Which would you prefer?",
                target
            )),
            (Some(command), None) => self.launch_desktop_app(&target, command),
            (None, Some(url)) => self.open_website(&target, url),
            (None, None) => {
                if let Some(items) = lookup(BUNDLES, &target) {
                    return self.launch_bundle(&target, items);
                }

                let mut message = format!(
                    "'{}' not found. I can search for it, or you can teach me where it is.",
                    target
                );
                if let Some(guess) = self.suggest(&target) {
                    message.push_str(&format!(" Did you mean '{}'?", guess));
                }
                Response::error(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;
    use std::sync::{Arc, Mutex};

    /// Records what would have been started
    #[derive(Default, Clone)]
    struct RecordingSpawner {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingSpawner {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(JarvisError::Launch("spawn refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl Spawner for RecordingSpawner {
        fn launch(&self, command: &str) -> Result<()> {
            self.record(format!("app:{}", command))
        }

        fn open_url(&self, url: &str) -> Result<()> {
            self.record(format!("url:{}", url))
        }
    }

    fn launcher() -> (AppLauncher, RecordingSpawner) {
        let spawner = RecordingSpawner::default();
        (AppLauncher::new(Box::new(spawner.clone())), spawner)
    }

    #[test]
    fn test_open_app() {
        let (launcher, spawner) = launcher();
        let response = launcher.smart_open("  VS Code ");
        assert_eq!(response.status, Status::Success);
        assert_eq!(response.message, "Launched vs code. Done, Boss.");
        assert_eq!(spawner.calls(), vec!["app:code"]);
    }

    #[test]
    fn test_open_website() {
        let (launcher, spawner) = launcher();
        let response = launcher.smart_open("youtube");
        assert!(response.is_success());
        assert_eq!(spawner.calls(), vec!["url:https://www.youtube.com"]);
    }

    #[test]
    fn test_ambiguous_name_asks_without_acting() {
        let (launcher, spawner) = launcher();
        let response = launcher.smart_open("outlook");
        assert_eq!(response.status, Status::Clarify);
        assert!(spawner.calls().is_empty());
    }

    #[test]
    fn test_bundle_opens_each_item() {
        let (launcher, spawner) = launcher();
        let response = launcher.smart_open("coding setup");
        assert_eq!(response.message, "Launched coding setup: 3/3 items opened. Done, Boss.");
        assert_eq!(
            spawner.calls(),
            vec!["app:code", "url:https://github.com", "url:https://stackoverflow.com"]
        );
    }

    #[test]
    fn test_bundle_counts_failures() {
        let spawner = RecordingSpawner {
            fail: true,
            ..Default::default()
        };
        let launcher = AppLauncher::new(Box::new(spawner.clone()));

        let response = launcher.smart_open("study setup");
        assert!(response.is_success());
        assert_eq!(response.message, "Launched study setup: 0/3 items opened. Done, Boss.");
        assert_eq!(spawner.calls().len(), 3);
    }

    #[test]
    fn test_spawn_failure_does_not_leak() {
        let spawner = RecordingSpawner {
            fail: true,
            ..Default::default()
        };
        let launcher = AppLauncher::new(Box::new(spawner));

        let response = launcher.smart_open("spotify");
        assert_eq!(response.status, Status::Error);
        assert!(!response.message.contains("refused"));
    }

    #[test]
    fn test_unknown_target_suggests() {
        let (launcher, spawner) = launcher();
        let response = launcher.smart_open("spotfy");
        assert_eq!(response.status, Status::Error);
        assert!(response.message.contains("Did you mean 'spotify'?"));
        assert!(spawner.calls().is_empty());
    }

    #[test]
    fn test_tables_have_one_ambiguous_name() {
        let ambiguous: Vec<_> = DESKTOP_APPS
            .iter()
            .filter(|(name, _)| lookup(WEBSITES, name).is_some())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(ambiguous, vec!["outlook"]);
    }
}
