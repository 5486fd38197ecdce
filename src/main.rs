use chain_catalog::config::Config;
use chain_catalog::logging;
use chain_catalog::server::{create_server, start_server};
use chain_catalog::startup::build_and_report;
use chain_catalog::state::AppState;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "chain_catalog")]
#[command(about = "Chain Fit Studio image catalog backend")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to CATALOG_CONFIG, then ./catalog.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the catalog, then serve it (default)
    Serve {
        /// Listen port, overrides PORT and the config file
        #[arg(long)]
        port: Option<u16>,
    },
    /// Build the catalog and print a summary without starting the server
    Build,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }

            let catalog = Arc::new(build_and_report(&config).await?);
            info!(chains = catalog.len(), "Catalog ready, starting server");

            let state = AppState::new(catalog)?;
            let app = create_server(state, &config.allowed_origins);
            start_server(app, config.port).await?;
        }
        Commands::Build => {
            let catalog = build_and_report(&config).await?;
            for entry in catalog.entries() {
                let kind = if entry.is_inline() { "inline" } else { "url" };
                println!("{}\t{}\t{} bytes", entry.name, kind, entry.image_ref.len());
            }
            println!("Total chains: {}", catalog.len());
        }
    }

    Ok(())
}
