// HTTP transport. One router behind a mutex, so commands are handled one at
// a time and history/context are never mutated concurrently.

use crate::automation::{SystemVitals, VitalsReader};
use crate::core::{Response, Router};
use crate::error::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub const BANNER: &str = "JARVIS System Monitor Backend Online";

pub type SharedRouter = Arc<Mutex<Router>>;

#[derive(Clone)]
pub struct AppState {
    router: SharedRouter,
    vitals: Arc<dyn VitalsReader>,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: String,
}

pub fn app(router: Router, vitals: Arc<dyn VitalsReader>) -> axum::Router {
    let state = AppState {
        router: Arc::new(Mutex::new(router)),
        vitals,
    };

    axum::Router::new()
        .route("/", get(banner))
        .route("/command", post(command))
        .route("/stats", get(stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

async fn command(State(state): State<AppState>, Json(request): Json<CommandRequest>) -> Json<Response> {
    let mut router = state.router.lock().await;
    Json(router.resolve(&request.command).await)
}

async fn stats(
    State(state): State<AppState>,
) -> std::result::Result<Json<SystemVitals>, (StatusCode, Json<Value>)> {
    state.vitals.read().await.map(Json).map_err(|e| {
        warn!(error = %e, "vitals read failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": e.user_message() })),
        )
    })
}

pub async fn serve(router: Router, vitals: Arc<dyn VitalsReader>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app(router, vitals)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::vitals::{GpuUsage, RamUsage};
    use crate::automation::{AppLauncher, DownloadsOrganizer};
    use crate::core::{Collaborators, Status};
    use crate::error::JarvisError;
    use async_trait::async_trait;
    use crate::db::Database;
    use crate::intelligence::knowledge;
    use crate::intelligence::personality::{FixedRandom, Personality};
    use crate::web::{DuckDuckGo, WebSearchAdapter, Wttr};
    use std::time::Duration;
    use tempfile::TempDir;

    // Outbound endpoints point at a closed port; these tests never reach them.
    const UNREACHABLE: &str = "http://127.0.0.1:9/";

    /// Fixed vitals, or an error when `vitals` is `None`
    struct FakeVitals {
        vitals: Option<SystemVitals>,
    }

    #[async_trait]
    impl VitalsReader for FakeVitals {
        async fn read(&self) -> Result<SystemVitals> {
            self.vitals
                .clone()
                .ok_or_else(|| JarvisError::Vitals("no /proc here".to_string()))
        }
    }

    fn sample_vitals() -> SystemVitals {
        SystemVitals {
            cpu: 23.5,
            ram: RamUsage {
                percent: 41.2,
                used_gb: 6.59,
                total_gb: 16.0,
            },
            gpu: Some(GpuUsage {
                name: "Test GPU".to_string(),
                load: 12.0,
                memory_used: 512.0,
                memory_total: 8192.0,
                temperature: 48.0,
            }),
        }
    }

    async fn spawn_app(downloads: &TempDir) -> String {
        spawn_app_with(downloads, Some(sample_vitals())).await
    }

    async fn spawn_app_with(downloads: &TempDir, vitals: Option<SystemVitals>) -> String {
        let timeout = Duration::from_secs(1);
        let router = Router::new(Collaborators {
            store: Arc::new(Database::new_test().await.unwrap()),
            automation: Arc::new(DownloadsOrganizer::new(downloads.path())),
            launcher: Arc::new(AppLauncher::default()),
            weather: Arc::new(Wttr::new(UNREACHABLE, timeout).unwrap()),
            search: WebSearchAdapter::new(Arc::new(
                DuckDuckGo::new(UNREACHABLE, "us-en", timeout).unwrap(),
            )),
        })
        .with_personality(Personality::new(Box::new(FixedRandom::quiet())));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app(router, Arc::new(FakeVitals { vitals })))
                .await
                .unwrap();
        });

        format!("http://{}", addr)
    }

    async fn post_command(base: &str, command: &str) -> Response {
        reqwest::Client::new()
            .post(format!("{}/command", base))
            .json(&json!({ "command": command }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_banner() {
        let downloads = TempDir::new().unwrap();
        let base = spawn_app(&downloads).await;

        let body = reqwest::get(&base).await.unwrap().text().await.unwrap();
        assert_eq!(body, BANNER);
    }

    #[tokio::test]
    async fn test_command_round_trip() {
        let downloads = TempDir::new().unwrap();
        let base = spawn_app(&downloads).await;

        let response = post_command(&base, "what is python").await;
        assert_eq!(response.status, Status::Success);
        assert_eq!(response.message, knowledge::lookup("python").unwrap().1);
    }

    #[tokio::test]
    async fn test_state_persists_across_requests() {
        let downloads = TempDir::new().unwrap();
        std::fs::write(downloads.path().join("song.mp3"), b"x").unwrap();
        let base = spawn_app(&downloads).await;

        let response = post_command(&base, "organize my downloads").await;
        assert_eq!(response.message, "Protocol Complete. Organized 1 files.");

        post_command(&base, "call me Pepper").await;
        let response = post_command(&base, "hello").await;
        assert_eq!(response.message, "Yes, Pepper?");
    }

    #[tokio::test]
    async fn test_weather_offline_is_an_error_response() {
        let downloads = TempDir::new().unwrap();
        let base = spawn_app(&downloads).await;

        let response = post_command(&base, "weather").await;
        assert_eq!(response.status, Status::Error);
        assert_eq!(response.message, "Weather sensors offline.");
    }

    #[tokio::test]
    async fn test_missing_command_field() {
        let downloads = TempDir::new().unwrap();
        let base = spawn_app(&downloads).await;

        let response: Response = reqwest::Client::new()
            .post(format!("{}/command", base))
            .json(&json!({}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(response.status, Status::Unknown);
    }

    #[tokio::test]
    async fn test_stats_reports_vitals() {
        let downloads = TempDir::new().unwrap();
        let base = spawn_app(&downloads).await;

        let body: Value = reqwest::get(format!("{}/stats", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["cpu"], 23.5);
        assert_eq!(body["ram"]["percent"], 41.2);
        assert_eq!(body["ram"]["used_gb"], 6.59);
        assert_eq!(body["ram"]["total_gb"], 16.0);
        assert_eq!(body["gpu"]["name"], "Test GPU");
    }

    #[tokio::test]
    async fn test_stats_without_gpu_is_null() {
        let downloads = TempDir::new().unwrap();
        let mut vitals = sample_vitals();
        vitals.gpu = None;
        let base = spawn_app_with(&downloads, Some(vitals)).await;

        let body: Value = reqwest::get(format!("{}/stats", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(body["gpu"].is_null());
    }

    #[tokio::test]
    async fn test_stats_failure_is_unavailable() {
        let downloads = TempDir::new().unwrap();
        let base = spawn_app_with(&downloads, None).await;

        let response = reqwest::get(format!("{}/stats", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "System vitals are unavailable right now.");
        assert!(!body.to_string().contains("/proc"));
    }
}
