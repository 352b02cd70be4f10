//! Per-target fetch worker
//!
//! A worker takes one target to a terminal [`FetchOutcome`]: validate the
//! URL, issue the GET, classify the response, and on 2xx persist the body
//! under the output directory. Every path updates exactly one outcome
//! counter and emits exactly one log line with the elapsed time; nothing
//! here ever aborts the run.

use crate::config::Config;
use crate::stats::RunStats;
use reqwest::{Client, Response};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use thiserror::Error;
use url::Url;

/// Terminal result of processing one target
#[derive(Debug)]
pub enum FetchOutcome {
    /// Body fetched and written to disk
    Saved {
        /// Exact length of the body written
        bytes: u64,
        /// Where it was written
        path: PathBuf,
    },

    /// Server answered with a non-2xx status; body discarded, no file written
    HttpWarning {
        /// The HTTP status code
        status: u16,
    },

    /// The target failed before a body could be persisted
    Failed(FetchFailure),
}

/// Why a target failed
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response body exceeded {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("write failed: {0}")]
    Write(String),
}

// Distinguishes temp files when two workers persist the same host at once
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Processes one target end-to-end, recording its outcome and audit line
pub async fn fetch_target(
    client: &Client,
    config: &Config,
    stats: &RunStats,
    raw_url: &str,
) -> FetchOutcome {
    let started = Instant::now();
    let outcome = process(client, config, raw_url).await;
    let elapsed = started.elapsed().as_secs_f64();

    match &outcome {
        FetchOutcome::Saved { bytes, path } => {
            stats.incr_success();
            stats.add_bytes(*bytes);
            tracing::info!(
                "{} -> {} bytes saved ({}) ({:.2}s)",
                raw_url,
                bytes,
                path.display(),
                elapsed
            );
        }
        FetchOutcome::HttpWarning { status } => {
            stats.incr_warning();
            tracing::warn!("{} -> HTTP {} ({:.2}s)", raw_url, status, elapsed);
        }
        FetchOutcome::Failed(failure) => {
            stats.incr_failed();
            tracing::error!("{} -> {} ({:.2}s)", raw_url, failure, elapsed);
        }
    }

    outcome
}

async fn process(client: &Client, config: &Config, raw_url: &str) -> FetchOutcome {
    let url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(e) => return FetchOutcome::Failed(FetchFailure::InvalidUrl(e.to_string())),
    };

    let file_name = match target_file_name(&url) {
        Some(name) => name,
        None => {
            return FetchOutcome::Failed(FetchFailure::InvalidUrl(
                "missing host component".to_string(),
            ))
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Failed(FetchFailure::Transport(describe_transport_error(&e)))
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpWarning {
            status: status.as_u16(),
        };
    }

    let body = match read_body_capped(response, config.fetch.max_body_bytes).await {
        Ok(body) => body,
        Err(failure) => return FetchOutcome::Failed(failure),
    };

    let path = config.output.directory.join(&file_name);
    if let Err(failure) = persist_atomic(&path, &body).await {
        return FetchOutcome::Failed(failure);
    }

    FetchOutcome::Saved {
        bytes: body.len() as u64,
        path,
    }
}

/// Derives the output filename from the target's host component
///
/// Non-default ports keep the original `host:port` form with the colon
/// replaced by an underscore, so `http://example.com:8080/x` maps to
/// `example.com_8080.html`.
pub fn target_file_name(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    let name = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Some(format!("{}.html", name.replace(':', "_")))
}

/// Reads the full response body into memory, bounded by `limit` bytes
///
/// A declared Content-Length over the cap short-circuits without reading;
/// otherwise the body is accumulated chunk-wise and abandoned the moment it
/// crosses the cap. An over-cap body is a failure, never a truncated file.
async fn read_body_capped(mut response: Response, limit: u64) -> Result<Vec<u8>, FetchFailure> {
    if let Some(length) = response.content_length() {
        if length > limit {
            return Err(FetchFailure::BodyTooLarge { limit });
        }
    }

    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if body.len() as u64 + chunk.len() as u64 > limit {
                    return Err(FetchFailure::BodyTooLarge { limit });
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => return Err(FetchFailure::Transport(describe_transport_error(&e))),
        }
    }

    Ok(body)
}

/// Writes `body` to `path` so that no reader ever observes a partial file
///
/// The body goes to a uniquely named temp file in the same directory, then
/// a rename moves it into place. Same-host targets racing on one filename
/// resolve to last-writer-wins.
async fn persist_atomic(path: &Path, body: &[u8]) -> Result<(), FetchFailure> {
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("html.{}.tmp", seq));

    if let Err(e) = tokio::fs::write(&tmp, body).await {
        return Err(FetchFailure::Write(e.to_string()));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(FetchFailure::Write(e.to_string()));
    }

    Ok(())
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}
