//! mindcare-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables and command-line flags.
//! 2. Initialise structured tracing (JSON in production, pretty in dev,
//!    optionally mirrored to a daily rolling file).
//! 3. Wire the upstream API clients into the shared state.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod middleware;
mod routes;
mod schemas;
mod state;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::config::Config;
use crate::state::AppState;

/// MindCare wellness companion API server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address to bind, overrides `MINDCARE_BIND`.
    #[arg(long)]
    bind: Option<String>,

    /// Tracing filter, overrides `MINDCARE_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON log lines, overrides `MINDCARE_LOG_JSON`.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cli = Cli::parse();
    let mut cfg = Config::from_env();
    if let Some(bind) = cli.bind {
        cfg.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }
    cfg.log_json |= cli.log_json;

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    // Keep the guard alive for the whole process so buffered file logs flush.
    let _log_guard = init_tracing(&cfg);

    info!(version = env!("CARGO_PKG_VERSION"), "mindcare-server starting");
    cfg.warn_missing_secrets();
    info!(
        chat_model = %cfg.gemini.chat_model,
        analysis_model = %cfg.gemini.analysis_model,
        history_policy = %cfg.history_policy,
        "upstream configuration loaded"
    );

    // ── 3. Shared application state ────────────────────────────────────────────
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let state = Arc::new(AppState::from_config(cfg));

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mindcare-server stopped");
    Ok(())
}

/// Install the global subscriber; returns the file writer guard when file
/// logging is enabled.
fn init_tracing(cfg: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: MINDCARE_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let (file_writer, guard) = match &cfg.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "mindcare-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    match (cfg.log_json, file_writer) {
        (true, Some(file)) => subscriber.json().with_writer(std::io::stdout.and(file)).init(),
        (true, None) => subscriber.json().init(),
        (false, Some(file)) => subscriber.with_writer(std::io::stdout.and(file)).init(),
        (false, None) => subscriber.init(),
    }

    guard
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
