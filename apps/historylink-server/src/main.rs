//! Historylink server entry point

mod config;
mod logging;
mod server;

use anyhow::Result;
use clap::Parser;
use config::AppConfig;
use historylink::HistorylinkModule;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "historylink-server", version, about = "Historylink REST server")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    logging::init(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting historylink server");

    let db = Arc::new(server::connect(&config.database).await?);
    let module = HistorylinkModule::default();

    if cli.migrate_only || config.database.auto_migrate {
        module.migrate(&db).await?;
    }
    if cli.migrate_only {
        return Ok(());
    }

    module.init(db, config.historylink.clone())?;
    let router = server::build_router(&module, &config.server)?;
    server::serve(router, &config.server).await
}
