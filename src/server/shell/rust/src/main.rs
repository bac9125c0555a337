/* src/server/shell/rust/src/main.rs */

mod config;
mod error;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::resolve_config;

#[derive(Parser)]
#[command(name = "terra", about = "Terra Explorer shell server")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the SPA shell, static assets and the health endpoint
  Serve {
    /// Path to terra.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to bind, overriding the config file
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
    /// Site root, overriding the config file
    #[arg(long)]
    root: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
  },
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Serve { config, port, root, verbose } => {
      init_logging(verbose);
      let cwd = std::env::current_dir().context("failed to get current directory")?;
      let mut config = resolve_config(config.as_deref(), &cwd)?;
      if let Some(port) = port {
        config.server.port = port;
      }
      if let Some(root) = root {
        config.site.root = root;
      }
      server::serve(&config).await.with_context(|| format!("server on {}", config.bind_addr()))?;
    }
  }

  Ok(())
}
