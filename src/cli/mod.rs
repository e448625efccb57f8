pub mod commands;

use clap::{Parser, Subcommand};

use crate::config;

#[derive(Parser)]
#[command(name = "taskman")]
#[command(about = "Task Management API - multi-user task tracking over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default when no command is given)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::config().clone().resolve()?;
    tracing::info!("Starting Task Management API in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Migrate => commands::migrate::handle(config).await,
    }
}
