use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use liftplan::{
    config::{Config, DB_ENV},
    db::{self, DB},
    types::OutputFmt,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;

async fn connect(config_path: &Path, flag: Option<&str>) -> Result<DB> {
    let cfg = Config::load(config_path)?;
    let env_db = std::env::var(DB_ENV).ok();
    let db_path = cfg.db_path(flag, env_db.as_deref());
    tracing::info!(db = %db_path, "opening database");

    db::open(&db_path)
        .await
        .with_context(|| format!("opening database `{db_path}`"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let out = OutputFmt::from_flag(cli.json);
    let config_path = Config::default_path().context("Could not determine config directory")?;

    match cli.cmd {
        Commands::Plan(cmd) => {
            let pool = connect(&config_path, cli.db.as_deref()).await?;
            commands::plan::handle(cmd, &pool, out).await?;
            pool.close().await;
        }
        Commands::Exercise(cmd) => {
            let pool = connect(&config_path, cli.db.as_deref()).await?;
            commands::exercise::handle(cmd, &pool, out).await?;
            pool.close().await;
        }
        Commands::Config(cmd) => {
            commands::config::handle(cmd, &config_path, cli.db.as_deref()).await?
        }
    }

    Ok(())
}
