use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routegen")]
#[command(about = "Generate an axum router from a file-based routes directory", long_about = None)]
struct Cli {
    /// JSON config with `base` and `output` keys
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = routegen::GeneratorConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    config.log_startup();

    let report = routegen::generate(&config).context("route generation failed")?;
    if !report.is_complete() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "some handler files were skipped"
        );
    }
    Ok(())
}
