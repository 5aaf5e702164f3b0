//! bmsdf - Main Entry Point

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    tracing::info!("bmsdf {} - {}", bmsdf_engine::VERSION, args.font.display());

    let output = bmsdf_engine::generate_from_file(&args.font, &config)
        .with_context(|| format!("Failed to build atlas for {}", args.font.display()))?;

    let written = output
        .write_all(&args.out_dir)
        .with_context(|| format!("Failed to write atlas to {}", args.out_dir.display()))?;
    for path in &written {
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}
