use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use goethe_dataset::config::DEFAULT_CONFIG_FILE;
use goethe_dataset::{pipeline, Settings};
use tracing::info;

#[derive(Parser)]
#[command(name = "format_dataset", about = "Build train/validation chat JSONL from extracted records")]
struct Cli {
    /// Config file (extension optional; missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
    /// Resolve relative data paths under this directory
    #[arg(long)]
    root: Option<PathBuf>,
    /// Shuffle seed (default: unseeded)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let t0 = Instant::now();

    let mut settings = Settings::load(&cli.config).context("loading settings")?;
    settings.apply_overrides(cli.root.as_deref(), cli.seed);
    info!(config = %cli.config, seed = ?settings.dataset.seed, "Starting dataset formatting");

    println!("Goethe Dataset Formatting");
    println!("=========================\n");

    let summary = pipeline::run_formatting(&settings)?;
    summary.print();
    println!("Train:      {}", settings.paths.train_jsonl.display());
    println!("Validation: {}", settings.paths.val_jsonl.display());
    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
