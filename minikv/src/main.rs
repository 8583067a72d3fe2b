use anyhow::Result;
use clap::Parser;
use minikv::config::Config;
use minikv::session::{self, AppState};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "minikv")]
#[command(about = "Minimal durable key-value store", long_about = None)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the data file path
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(path) = args.data_file {
        config.storage.path = path;
    }
    if args.ephemeral {
        config.storage.enabled = false;
    }

    init_tracing(&config);

    info!("Starting minikv v{}", env!("CARGO_PKG_VERSION"));

    let mut state = AppState::open(&config)?;
    session::run(&mut state)?;

    let stats = state.kv_store.stats();
    info!(
        "Shutting down. keys={} sets={} gets={} hit_rate={:.2}",
        stats.total_keys,
        stats.sets,
        stats.gets,
        stats.hit_rate()
    );

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    // Diagnostics stay on stderr; stdout carries only command results
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
