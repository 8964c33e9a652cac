//! Enterprise Voice Agent MCP Server Entry Point

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use voice_mcp_config::{load_settings, Settings};
use voice_mcp_server::{create_router, stdio, AppState};
use voice_mcp_tools::{SERVER_NAME, SERVER_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

#[derive(Debug, Parser)]
#[command(name = "voice-mcp-server", version, about = "Enterprise voice agent MCP server")]
struct Cli {
    /// Transport to serve on
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// HTTP port, overrides settings
    #[arg(long)]
    port: Option<u16>,

    /// Settings file, layered over config/default and config/<env>
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::from_filename("mcp-server.env").ok();

    // Priority: CLI > env vars > --config file > config/{env} > config/default > defaults
    let env = std::env::var("VOICE_MCP_ENV").ok();
    let mut settings = match load_settings(env.as_deref(), cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load settings: {}. Using defaults.", e);
            Settings::default()
        }
    };
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    init_tracing(&settings);

    tracing::info!(
        server = SERVER_NAME,
        version = SERVER_VERSION,
        transport = ?cli.transport,
        environment = env.as_deref().unwrap_or("default"),
        "Starting MCP server"
    );
    tracing::info!(
        vapi_configured = settings.credentials.vapi_configured,
        openai_configured = settings.credentials.openai_configured,
        default_provider = %settings.voice.default_provider,
        "Voice provider credentials"
    );

    let startup_config = settings.startup_config.clone();
    let state = AppState::new(settings);

    if let Some(path) = startup_config {
        if let Err(e) = state.load_startup_config(Path::new(&path)) {
            tracing::warn!(path = %path, error = %e, "Startup configuration not loaded");
        }
    }

    match cli.transport {
        Transport::Stdio => {
            tokio::select! {
                result = stdio::run_stdio(state) => result?,
                _ = shutdown_signal() => {}
            }
        }
        Transport::Http => serve_http(state).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn serve_http(state: AppState) -> anyhow::Result<()> {
    let server = state.get_settings().server;
    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;

    let app = create_router(state);

    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}

/// Logs go to stderr; stdout belongs to the stdio transport
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("voice_mcp={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
