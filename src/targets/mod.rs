//! Target list loading
//!
//! A target file is either a structured TOML list (`targets = [...]`) or a
//! newline-delimited plain text file. Blank lines and `#` comments are
//! skipped, and entries without a scheme get `http://` prefixed. A `.toml`
//! file that fails to parse is read again as plain text so a hand-written
//! URL list with the wrong extension still works.

use crate::TargetError;
use serde::Deserialize;
use std::path::Path;

/// Structured shape of a TOML target file
#[derive(Debug, Deserialize)]
struct TargetList {
    targets: Vec<String>,
}

/// Reads the target list from a file
///
/// An unreadable file is fatal for the whole run; individual entries are
/// never rejected here beyond comment/blank skipping, since a malformed URL
/// still gets its own per-target outcome later.
pub fn read_targets(path: &Path) -> Result<Vec<String>, TargetError> {
    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|e| e.to_str()) == Some("toml") {
        match toml::from_str::<TargetList>(&content) {
            Ok(list) => {
                return Ok(list
                    .targets
                    .iter()
                    .filter_map(|entry| normalize_target(entry))
                    .collect());
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse {} as TOML ({}), reading as plain text",
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(content.lines().filter_map(normalize_target).collect())
}

/// Normalizes one raw entry into a target, or drops it
///
/// Returns `None` for blank lines and `#` comments. Scheme-less entries are
/// prefixed with `http://`; already-prefixed entries pass through unchanged,
/// so normalizing twice is a no-op.
pub fn normalize_target(raw: &str) -> Option<String> {
    let entry = raw.trim();

    if entry.is_empty() || entry.starts_with('#') {
        return None;
    }

    if entry.starts_with("http://") || entry.starts_with("https://") {
        Some(entry.to_string())
    } else {
        Some(format!("http://{}", entry))
    }
}
