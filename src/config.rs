/// Runtime configuration
///
/// Everything is optional and read from `JARVIS_*` environment variables
/// (a `.env` file is loaded by the binary before this runs).

use crate::error::{JarvisError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_SEARCH_REGION: &str = "us-en";
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub downloads_dir: PathBuf,
    pub search_url: String,
    pub search_region: String,
    pub language_hint: Option<String>,
    pub weather_url: String,
    pub http_timeout: Duration,
    pub bind: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let home = dirs::home_dir()
            .ok_or_else(|| JarvisError::Config("could not find home directory".to_string()))?;

        let db_path = get("JARVIS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".jarvis").join("memory.db"));

        let downloads_dir = get("JARVIS_DOWNLOADS_DIR")
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| home.join("Downloads"));

        let http_timeout = match get("JARVIS_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    JarvisError::Config(format!("JARVIS_HTTP_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(JarvisError::Config(
                        "JARVIS_HTTP_TIMEOUT_SECS must be at least 1".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let bind_raw = get("JARVIS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse()
            .map_err(|_| JarvisError::Config(format!("JARVIS_BIND is not an address: {}", bind_raw)))?;

        Ok(Self {
            db_path,
            downloads_dir,
            search_url: get("JARVIS_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            search_region: get("JARVIS_SEARCH_REGION")
                .unwrap_or_else(|| DEFAULT_SEARCH_REGION.to_string()),
            language_hint: get("JARVIS_LANGUAGE_HINT"),
            weather_url: get("JARVIS_WEATHER_URL").unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            http_timeout,
            bind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert!(config.db_path.ends_with(".jarvis/memory.db"));
        assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.search_region, "us-en");
        assert_eq!(config.language_hint, None);
        assert_eq!(config.weather_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.bind.to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("JARVIS_DB_PATH", "/tmp/j.db"),
            ("JARVIS_DOWNLOADS_DIR", "/tmp/dl"),
            ("JARVIS_LANGUAGE_HINT", "english"),
            ("JARVIS_HTTP_TIMEOUT_SECS", " 5 "),
            ("JARVIS_BIND", "0.0.0.0:8080"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/j.db"));
        assert_eq!(config.downloads_dir, PathBuf::from("/tmp/dl"));
        assert_eq!(config.language_hint.as_deref(), Some("english"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.bind.port(), 8080);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config(&[("JARVIS_SEARCH_REGION", "   "), ("JARVIS_LANGUAGE_HINT", "")]).unwrap();
        assert_eq!(config.search_region, DEFAULT_SEARCH_REGION);
        assert_eq!(config.language_hint, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("JARVIS_HTTP_TIMEOUT_SECS", "soon")]),
            Err(JarvisError::Config(_))
        ));
        assert!(matches!(
            config(&[("JARVIS_HTTP_TIMEOUT_SECS", "0")]),
            Err(JarvisError::Config(_))
        ));
        assert!(matches!(
            config(&[("JARVIS_BIND", "localhost")]),
            Err(JarvisError::Config(_))
        ));
    }
}
