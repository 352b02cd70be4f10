//! Torfetch main entry point
//!
//! Command-line interface for the proxy-routed page fetcher.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use torfetch::config;
use torfetch::stats::RunStats;
use torfetch::{fetch, output, targets};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Torfetch: a proxy-routed page fetcher
///
/// Fetches every target in a list through a SOCKS proxy with a fixed
/// concurrency ceiling, saves the pages, and reports outcome statistics.
#[derive(Parser, Debug)]
#[command(name = "torfetch")]
#[command(version = "0.1.0")]
#[command(about = "Fetch a target list through a SOCKS proxy", long_about = None)]
struct Cli {
    /// Path to the target list (TOML list or newline-delimited text)
    #[arg(value_name = "TARGETS", default_value = "targets.toml")]
    targets: PathBuf,

    /// Path to the TOML configuration file (default: ./torfetch.toml if present)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    print_banner();

    // An explicitly given config path must exist; the default path may not
    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = config::load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            (config, Some(hash))
        }
        None => config::load_or_default(Path::new(config::DEFAULT_CONFIG_PATH))
            .context("failed to load configuration")?,
    };

    // Everything a run writes to must exist before the first fetch is scheduled
    std::fs::create_dir_all(&config.output.directory).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output.directory.display()
        )
    })?;

    let report = std::fs::File::create(&config.output.report_path).with_context(|| {
        format!(
            "failed to open report file {}",
            config.output.report_path.display()
        )
    })?;

    setup_logging(report, cli.verbose, cli.quiet);

    match &config_hash {
        Some(hash) => tracing::info!("Configuration loaded (hash: {})", hash),
        None => tracing::info!("No config file found, using built-in defaults"),
    }

    let client = fetch::build_http_client(&config).context("failed to build HTTP client")?;

    if config.selfcheck.enabled {
        tracing::info!("Verifying proxy connectivity...");
        fetch::verify_proxy(&client, &config.selfcheck.url).await;
    }

    let target_list = targets::read_targets(&cli.targets)
        .with_context(|| format!("failed to read target list {}", cli.targets.display()))?;

    tracing::info!(
        "{} targets loaded from {}",
        target_list.len(),
        cli.targets.display()
    );
    tracing::info!("Maximum concurrent fetches: {}", config.fetch.max_concurrent);
    tracing::info!("{}", "-".repeat(80));

    let config = Arc::new(config);
    let stats = Arc::new(RunStats::new(target_list.len() as u64));

    fetch::run(client, Arc::clone(&config), Arc::clone(&stats), target_list).await;

    output::log_summary(&stats.snapshot(), &config);

    Ok(())
}

/// Sets up the logging subscriber: one layer to the console, one to the
/// report file, both behind the same verbosity filter
fn setup_logging(report: std::fs::File, verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("torfetch=info,warn"),
            1 => EnvFilter::new("torfetch=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    let console_layer = fmt::layer().with_target(false);
    let report_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(report));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(report_layer)
        .init();
}

fn print_banner() {
    println!(
        r#"
================================================================
  torfetch - proxy-routed page fetcher
  For authorized research and archival use only.
================================================================
"#
    );
}
