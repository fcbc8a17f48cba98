//! Loan Lead Registry API - Main Entry Point

use std::io::BufRead;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loan_lead_registry::application::use_cases::RegisterOperatorUseCase;
use loan_lead_registry::infrastructure::driven_adapters::config::{AppConfig, LogFormat};
use loan_lead_registry::infrastructure::driven_adapters::{
    Argon2CredentialHasher, PostgresOperatorRepository, RecordStore,
};
use loan_lead_registry::infrastructure::driving_adapters::api_rest::{build_router, AppState};
use loan_lead_registry::shared::errors::set_expose_error_details;

#[derive(Debug, Parser)]
#[command(name = "lead-registry", about = "Loan lead intake and triage API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Create an operator account. The password is read from
    /// OPERATOR_PASSWORD, or from the first line of stdin.
    CreateOperator {
        #[arg(long)]
        username: String,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_lead_registry=debug,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn read_operator_password() -> anyhow::Result<String> {
    if let Ok(password) = std::env::var("OPERATOR_PASSWORD") {
        return Ok(password);
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn serve(config: AppConfig, store: RecordStore) -> anyhow::Result<()> {
    config.jwt.ensure_strong_secret()?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let rate_limit = config.rate_limit.clone();

    let app = build_router(AppState::new(&store, config), Some(&rate_limit));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn create_operator(store: RecordStore, username: &str) -> anyhow::Result<()> {
    let password = zeroize::Zeroizing::new(read_operator_password()?);
    let use_case = RegisterOperatorUseCase::new(
        Arc::new(PostgresOperatorRepository::new(&store)),
        Arc::new(Argon2CredentialHasher),
    );

    let operator = use_case.execute(username, &password).await?;
    tracing::info!(operator_id = %operator.id(), username = operator.username(), "Operator created");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;
    init_tracing(config.logging.format);
    tracing::info!("Configuration loaded successfully");

    set_expose_error_details(config.server.expose_error_details);

    // Create the record store and run migrations
    let store = RecordStore::connect(&config.database).await?;
    store.migrate().await?;
    tracing::info!("Database migrations completed");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, store).await,
        Command::CreateOperator { username } => create_operator(store, &username).await,
    }
}
