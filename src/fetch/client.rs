//! HTTP client construction
//!
//! One client is built per run and shared by every worker. The SOCKS proxy,
//! timeout, TLS posture, and connection-reuse policy all come from the
//! `[transport]` config section; the browser-profile request headers come
//! from `[headers]` and are applied as client defaults so every fetch and
//! the self-check send the same profile.

use crate::config::{Config, HeaderConfig};
use crate::{ConfigError, TorFetchError};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT,
};
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Builds the shared HTTP client from the run configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(TorFetchError)` - Invalid header value or client construction failure
pub fn build_http_client(config: &Config) -> Result<Client, TorFetchError> {
    let mut builder = Client::builder()
        .default_headers(default_headers(&config.headers)?)
        .timeout(Duration::from_secs(config.transport.timeout_secs));

    if config.transport.accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if config.transport.disable_keepalive {
        // No idle connections kept, so every request opens a fresh one
        builder = builder.pool_max_idle_per_host(0);
    }

    if config.transport.use_proxy {
        // socks5h: hostnames resolve through the proxy, never locally
        let proxy = Proxy::all(format!("socks5h://{}", config.transport.proxy_address))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Builds the default header map from the `[headers]` config section
fn default_headers(headers: &HeaderConfig) -> Result<HeaderMap, TorFetchError> {
    let mut map = HeaderMap::new();

    map.insert(USER_AGENT, parse_value("user-agent", &headers.user_agent)?);
    map.insert(ACCEPT, parse_value("accept", &headers.accept)?);
    map.insert(
        ACCEPT_LANGUAGE,
        parse_value("accept-language", &headers.accept_language)?,
    );

    // Unset by default: the client then negotiates compression itself and
    // transparently decodes, so saved bodies are plaintext
    if let Some(encoding) = &headers.accept_encoding {
        map.insert(ACCEPT_ENCODING, parse_value("accept-encoding", encoding)?);
    }

    map.insert(HeaderName::from_static("dnt"), parse_value("dnt", &headers.dnt)?);

    Ok(map)
}

fn parse_value(name: &str, value: &str) -> Result<HeaderValue, TorFetchError> {
    HeaderValue::from_str(value)
        .map_err(|_| ConfigError::InvalidHeader(name.to_string()).into())
}
