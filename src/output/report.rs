//! Final run summary
//!
//! The summary goes through tracing so it lands in both the console and the
//! report file, right after the per-target audit lines it totals up.

use crate::config::Config;
use crate::stats::StatsSnapshot;

/// Logs the end-of-run summary block
pub fn log_summary(snapshot: &StatsSnapshot, config: &Config) {
    let separator = "=".repeat(80);

    tracing::info!("{}", separator);
    tracing::info!("                              RUN SUMMARY");
    tracing::info!("{}", separator);
    tracing::info!("Total targets      : {}", snapshot.total);
    tracing::info!("Succeeded          : {}", snapshot.succeeded);
    tracing::info!("Failed             : {}", snapshot.failed);
    tracing::info!("Warnings (non-2xx) : {}", snapshot.warnings);
    tracing::info!("Total data         : {:.2} MB", snapshot.megabytes());
    tracing::info!("Elapsed            : {:.1?}", snapshot.elapsed);
    tracing::info!("{}", separator);
    tracing::info!("Saved pages        : {}", config.output.directory.display());
    tracing::info!("Detailed log       : {}", config.output.report_path.display());

    if snapshot.total > 0 {
        tracing::info!("Success rate       : {:.1}%", snapshot.success_rate());
    }

    tracing::info!("Run complete");
}
