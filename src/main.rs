use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{load_config, Config};
use requester::Requester;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the cotacao application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    init_tracing(&config);

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Server => handle_server(&config).await,
        Commands::Client => handle_client(&config).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "Command failed.");
    }
    result
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Serves and retrieves the USD-BRL exchange rate.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve `GET /cotacao`: fetch the quote upstream, store it, return it.
    Server,
    /// Ask the server for the quote once and write the bid to the output file.
    Client,
}

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_server(config: &Config) -> anyhow::Result<()> {
    web_server::run_server(config, shutdown_signal()).await
}

async fn handle_client(config: &Config) -> anyhow::Result<()> {
    let requester = Requester::new(&config.client)?;
    let contents = requester.run().await?;
    println!("Cotação armazenada em {}: {}", requester.output_path().display(), contents);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
