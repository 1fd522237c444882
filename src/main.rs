// jarvis - a personal assistant you talk to from the terminal or over HTTP
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use jarvis_lib::{
    automation::{AppLauncher, DownloadsOrganizer, ProcVitals},
    core::Collaborators,
    server,
    web::{DuckDuckGo, WebSearchAdapter, Wttr},
    Config, Database, Response, Result, Router, Status,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "ask" => handle_ask(&args[2..]).await,
        "chat" => handle_chat().await,
        "tasks" => handle_tasks().await,
        "serve" => handle_serve(&args[2..]).await,
        "version" | "-v" | "--version" => {
            println!("jarvis v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

// Logs go to stderr so stdout only carries answers
fn init_logging() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn handle_ask(args: &[String]) -> Result<()> {
    let text = args.join(" ");
    if text.trim().is_empty() {
        eprintln!("Usage: jarvis ask <text>");
        return Ok(());
    }

    let config = Config::from_env()?;
    let mut router = build_router(&config).await?;
    print_response(&router.resolve(&text).await);

    Ok(())
}

async fn handle_chat() -> Result<()> {
    let config = Config::from_env()?;
    // one router for the whole session so history and context carry over
    let mut router = build_router(&config).await?;

    println!("JARVIS online. Type 'exit' to leave.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        print_response(&router.resolve(line).await);
    }

    Ok(())
}

async fn handle_tasks() -> Result<()> {
    let config = Config::from_env()?;
    let db = Database::new(&config.db_path).await?;
    let tasks = db.list_pending_tasks().await?;
    let stats = db.stats().await?;

    if tasks.is_empty() {
        println!("You have no pending tasks.");
    } else {
        println!("\nPending tasks:");
        println!("{}", "=".repeat(60));
        for task in &tasks {
            println!("  [{}] {}", task.id, task.description);
        }
        println!("{}", "=".repeat(60));
    }

    println!(
        "{} pending of {} total, {} preferences stored",
        stats.pending_tasks, stats.total_tasks, stats.total_preferences
    );

    Ok(())
}

async fn handle_serve(args: &[String]) -> Result<()> {
    let config = Config::from_env()?;
    let addr: SocketAddr = match args.first() {
        Some(raw) => raw.parse().map_err(|_| {
            jarvis_lib::JarvisError::Config(format!("not a listen address: {}", raw))
        })?,
        None => config.bind,
    };

    println!("Initializing JARVIS on http://{}", addr);
    let router = build_router(&config).await?;
    server::serve(router, Arc::new(ProcVitals::new()), addr).await
}

async fn build_router(config: &Config) -> Result<Router> {
    let db = Database::new(&config.db_path).await?;
    let provider = DuckDuckGo::new(
        config.search_url.as_str(),
        config.search_region.as_str(),
        config.http_timeout,
    )?;
    let weather = Wttr::new(config.weather_url.as_str(), config.http_timeout)?;

    Ok(Router::new(Collaborators {
        store: Arc::new(db),
        automation: Arc::new(DownloadsOrganizer::new(&config.downloads_dir)),
        launcher: Arc::new(AppLauncher::default()),
        weather: Arc::new(weather),
        search: WebSearchAdapter::new(Arc::new(provider))
            .with_language_hint(config.language_hint.clone()),
    }))
}

fn print_response(response: &Response) {
    match response.status {
        Status::Success => println!("{}", response.message),
        status => println!("[{}] {}", status, response.message),
    }

    for (i, source) in response.sources.iter().enumerate() {
        println!("  {}. {} <{}>", i + 1, source.title, source.url);
    }
}

fn print_usage() {
    println!(
        r#"jarvis v{} - Your personal AI operating system

USAGE:
    jarvis <COMMAND> [OPTIONS]

COMMANDS:
    ask <text>             Send one command and print the answer
    chat                   Interactive session (history is kept)
    tasks                  Show pending tasks
    serve [addr]           Run the HTTP backend: /command and /stats (default: 127.0.0.1:5000)
    version                Show version
    help                   Show this help

EXAMPLES:
    jarvis ask what is python
    jarvis ask organize my downloads
    jarvis ask call me Tony
    jarvis serve 0.0.0.0:5000

CONFIGURATION:
    JARVIS_DB_PATH, JARVIS_DOWNLOADS_DIR, JARVIS_SEARCH_URL,
    JARVIS_SEARCH_REGION, JARVIS_LANGUAGE_HINT, JARVIS_WEATHER_URL,
    JARVIS_HTTP_TIMEOUT_SECS, JARVIS_BIND (a .env file is read too)
    RUST_LOG controls log verbosity (default: info)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
