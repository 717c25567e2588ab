use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use goethe_dataset::config::DEFAULT_CONFIG_FILE;
use goethe_dataset::{pipeline, Settings};
use tracing::info;

#[derive(Parser)]
#[command(name = "extract_records", about = "Extract poem and maxim records from the scraped HTML")]
struct Cli {
    /// Config file (extension optional; missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
    /// Resolve relative data paths under this directory
    #[arg(long)]
    root: Option<PathBuf>,
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
    settings.apply_overrides(cli.root.as_deref(), None);
    info!(config = %cli.config, "Starting record extraction");

    println!("Goethe Record Extraction");
    println!("========================\n");
    println!("Poems:  {}", settings.paths.poems_html.display());
    println!("Maxims: {}\n", settings.paths.maxims_html.display());

    let summary = pipeline::run_extraction(&settings)?;
    summary.print();
    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
