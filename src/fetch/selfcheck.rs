//! Proxy connectivity self-check
//!
//! One GET against a diagnostic endpoint before the run starts, answering
//! "is my traffic actually leaving through the anonymizing network?". The
//! result is advisory: a failed or negative check is logged loudly but never
//! stops the run.

use reqwest::Client;
use serde::Deserialize;

/// Shape of the diagnostic endpoint's JSON answer
#[derive(Debug, Deserialize)]
struct DiagnosticResponse {
    #[serde(rename = "IsTor")]
    is_tor: bool,

    #[serde(rename = "IP")]
    ip: Option<String>,
}

/// Probes the diagnostic endpoint through the shared client
///
/// Returns whether the endpoint confirmed the traffic came from the proxy
/// network.
pub async fn verify_proxy(client: &Client, url: &str) -> bool {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Connectivity check failed: {}", e);
            tracing::warn!("Make sure the proxy service is running and reachable");
            return false;
        }
    };

    match response.json::<DiagnosticResponse>().await {
        Ok(diag) if diag.is_tor => {
            match diag.ip {
                Some(ip) => tracing::info!("Proxy connection active, exit IP: {}", ip),
                None => tracing::info!("Proxy connection active"),
            }
            true
        }
        Ok(_) => {
            tracing::warn!("Proxy not detected, requests may expose the local IP");
            false
        }
        Err(e) => {
            tracing::warn!("Could not parse diagnostic response: {}", e);
            false
        }
    }
}
