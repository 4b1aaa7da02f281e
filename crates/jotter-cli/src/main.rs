use std::{fs, io, path::Path, process};

use anyhow::{Context, Result};
use clap::Parser;
use jotter_config::{ConfigStore, default_data_dir};
use jotter_services::NotebookBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod prompt;
mod render;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to prepare data dir {}", data_dir.display()))?;

    let config_store = ConfigStore::from_dir(data_dir.join("config"));
    let config = config_store.load_or_init()?;
    let _log_guard = init_local_logger(&data_dir.join("logs"), &config.log_filter);
    info!(config = %config_store.path().display(), "configuration loaded");

    let notebook = NotebookBuilder::new(data_dir.join("jotter.sqlite3"))
        .storage_quota(config.storage_quota_bytes)
        .build()
        .context("failed to open notebook")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    commands::dispatch(&notebook, &config, cli.command, &mut input, &mut output)
}

fn init_local_logger(
    log_dir: &Path,
    default_filter: &str,
) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "jotter.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    guard
}
