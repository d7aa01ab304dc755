//! cronhub-ctl: command-line interface for the cronhub task scheduler.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cronhub_client::{ClientConfig, ClientResult};

#[derive(Debug, Parser)]
#[command(
    name = "cronhub-ctl",
    version,
    about = "Manage cronhub scheduled tasks from the terminal",
    styles = output::clap_styles()
)]
struct Cli {
    /// Path to a client config file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and environment)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Session token sent as the Auth-Token header
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Task management operations
    #[command(subcommand)]
    Task(TaskCommands),
}

#[derive(Debug, Subcommand)]
pub(crate) enum TaskCommands {
    /// List tasks, with optional filters
    List {
        /// Filter by task name (substring match is backend-defined)
        #[arg(long)]
        name: Option<String>,
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
        /// Filter by status code
        #[arg(long)]
        status: Option<i32>,
        /// Filter by execution host id
        #[arg(long)]
        host_id: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    /// Show one task; without an id, list the available hosts instead
    Show {
        /// Task id (omit to inspect hosts for a new task)
        id: Option<i64>,
    },
    /// Create or update a task from a JSON payload (update when the payload
    /// contains an "id" field)
    Save {
        /// Task fields as a JSON object
        payload: String,
    },
    /// Delete a task
    Remove { id: i64 },
    /// Enable a task
    Enable { id: i64 },
    /// Disable a task
    Disable { id: i64 },
    /// Trigger immediate execution of a task
    Run { id: i64 },
    /// Enable several tasks in one request
    BatchEnable {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Disable several tasks in one request
    BatchDisable {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Delete several tasks in one request
    BatchRemove {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

/// Layer explicit CLI flags over the resolved file/env config.
fn resolve_config(cli: &Cli) -> ClientResult<ClientConfig> {
    let mut config = ClientConfig::resolve(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &cli.token {
        config.auth_token = Some(token.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::error(format!("Configuration error: {e}"));
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Task(cmd) => commands::handle_task_command(cmd, &config).await,
    };

    // Handlers already reported the failure; just set the exit code
    if result.is_err() {
        std::process::exit(1);
    }
}
