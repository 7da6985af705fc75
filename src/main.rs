use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod server;

use commands::{CheckCommand, ConfigCommand, ServeCommand, StateCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "ffa")]
#[command(version)]
#[command(about = "Keeps food lists and macro targets from disk ready for meal planning", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data directory, watch it for changes and serve it over HTTP
    Serve(ServeCommand),

    /// Validate a single data file
    Check(CheckCommand),

    /// Load the data directory once and print the snapshot
    State(StateCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ffa=info,ffa_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Serve(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Check(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::State(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
