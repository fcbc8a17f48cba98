//! Lead Admin - operator dashboard on the command line

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

use loan_lead_registry::dashboard::{
    write_bank_connections_csv, write_leads_csv, Dashboard, HttpDashboardApi, LeadFilter, RefreshOutcome,
};
use loan_lead_registry::domain::models::application::ApplicationStatus;

#[derive(Debug, Parser)]
#[command(name = "lead-admin", about = "Triage loan leads from the command line")]
struct Cli {
    /// Registry API base URL
    #[arg(long, env = "LEAD_ADMIN_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Operator username; the password is read from LEAD_ADMIN_PASSWORD
    #[arg(long, env = "LEAD_ADMIN_USERNAME")]
    username: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print server-side aggregates
    Stats,
    /// List leads, optionally filtered, as CSV
    Leads {
        /// Case-insensitive match on name, email or phone
        #[arg(long)]
        search: Option<String>,
        /// new, contacted, pending, approved or rejected
        #[arg(long)]
        status: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// List bank connection follow-ups as CSV
    BankConnections {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Change a lead's status
    SetStatus { id: String, status: String },
    /// Delete a lead
    Delete { id: String },
    /// Delete a bank connection follow-up
    DeleteBankConnection { id: String },
    /// Refresh periodically until interrupted
    Watch {
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_lead_registry=info,lead_admin=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn load(dashboard: &Dashboard) -> anyhow::Result<()> {
    match dashboard.refresh().await {
        RefreshOutcome::Fresh => Ok(()),
        RefreshOutcome::Stale { error } => anyhow::bail!("could not load leads: {error}"),
    }
}

fn status_filter(label: Option<&str>) -> anyhow::Result<Option<ApplicationStatus>> {
    label
        .map(ApplicationStatus::from_dashboard_label)
        .transpose()
        .context("unknown status filter")
}

async fn run(dashboard: &Dashboard, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stats => {
            let stats = dashboard.stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Leads { search, status, csv } => {
            load(dashboard).await?;
            let filter = LeadFilter {
                search,
                status: status_filter(status.as_deref())?,
            };
            let leads = dashboard.leads(&filter).await;
            match csv {
                Some(path) => {
                    let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
                    write_leads_csv(file, &leads)?;
                    tracing::info!(count = leads.len(), path = %path.display(), "Leads exported");
                }
                None => write_leads_csv(std::io::stdout().lock(), &leads)?,
            }
        }
        Command::BankConnections { csv } => {
            load(dashboard).await?;
            let connections = dashboard.bank_connections().await;
            match csv {
                Some(path) => {
                    let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
                    write_bank_connections_csv(file, &connections)?;
                    tracing::info!(count = connections.len(), path = %path.display(), "Bank connections exported");
                }
                None => write_bank_connections_csv(std::io::stdout().lock(), &connections)?,
            }
        }
        Command::SetStatus { id, status } => {
            let response = dashboard.set_status(&id, &status).await?;
            match response.bank_connection_id {
                Some(connection_id) => println!("{id}: {} (bank connection {connection_id})", response.status),
                None => println!("{id}: {}", response.status),
            }
        }
        Command::Delete { id } => {
            dashboard.delete_application(&id).await?;
            println!("{id}: deleted");
        }
        Command::DeleteBankConnection { id } => {
            dashboard.delete_bank_connection(&id).await?;
            println!("{id}: deleted");
        }
        Command::Watch { interval } => {
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %err, "Failed to listen for shutdown signal");
                }
            };
            dashboard.poll(Duration::from_secs(interval.max(1)), shutdown).await;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let password = Zeroizing::new(std::env::var("LEAD_ADMIN_PASSWORD").context("LEAD_ADMIN_PASSWORD is not set")?);
    let api = HttpDashboardApi::login(&cli.base_url, &cli.username, &password).await?;
    let dashboard = Dashboard::new(Arc::new(api));

    run(&dashboard, cli.command).await
}
