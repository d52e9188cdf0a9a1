//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use vestibule_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "vestibule")]
#[command(version)]
#[command(about = "Login client for the task-list backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the backend base URL for this invocation
    #[arg(long, value_name = "URL", global = true)]
    backend_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Authenticate against the backend
    Login {
        /// Account name to log in with
        #[arg(short, long)]
        username: String,

        /// Password for the account
        #[arg(short, long)]
        password: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::login::run(&config, cli.backend_url.as_deref(), &username, &password).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
        },
    }
}
