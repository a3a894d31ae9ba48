// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_box::{RecipeBoxConfig, ServerConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(author, version, about = "In-memory recipe service with a CRUD HTTP API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the recipe server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to bind to (host:port), overrides the config file
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Load and validate a config file
    CheckConfig {
        /// Path to the TOML config file
        path: PathBuf,
    },
}

fn load_config(path: &Path) -> Result<RecipeBoxConfig> {
    RecipeBoxConfig::load(path)
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => {
            let mut server_config = match config {
                Some(path) => {
                    info!("Using config file: {}", path.display());
                    load_config(&path)?.to_server_config()?
                }
                None => ServerConfig::default(),
            };
            if let Some(addr) = bind {
                server_config.bind_addr = addr;
            }

            recipe_box::serve_until_signal(server_config)
                .await
                .context("Server failed")?;
            Ok(())
        }
        Commands::CheckConfig { path } => {
            let config = load_config(&path)?;
            let server_config = config.to_server_config()?;
            println!("Config OK: {}", path.display());
            println!("  bind:          {}", server_config.bind_addr);
            println!("  cors:          {}", server_config.enable_cors);
            println!("  id scheme:     {:?}", server_config.id_scheme);
            println!("  delete policy: {:?}", server_config.delete_policy);
            println!("  seed recipes:  {}", server_config.seed.len());
            Ok(())
        }
    }
}
