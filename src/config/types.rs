use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for torfetch
///
/// Every section and field has a default mirroring the tool's built-in
/// behavior, so a missing config file (or a partial one) is always usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transport: TransportConfig,
    pub fetch: FetchConfig,
    pub headers: HeaderConfig,
    pub output: OutputConfig,
    pub selfcheck: SelfcheckConfig,
}

/// HTTP transport configuration
///
/// The defaults reproduce the tool's intended posture for a local Tor SOCKS
/// proxy: every request uses a fresh connection and the proxy's TLS
/// termination is not verified. Both are deliberate anonymity tradeoffs and
/// both can be turned off here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Route all requests through the SOCKS proxy
    #[serde(rename = "use-proxy")]
    pub use_proxy: bool,

    /// SOCKS5 proxy endpoint as host:port (9150 = Tor Browser, 9050 = daemon)
    #[serde(rename = "proxy-address")]
    pub proxy_address: String,

    /// Upper bound on the time a single request may block, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation
    #[serde(rename = "accept-invalid-certs")]
    pub accept_invalid_certs: bool,

    /// Disable connection reuse so each request opens a fresh connection
    #[serde(rename = "disable-keepalive")]
    pub disable_keepalive: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            use_proxy: true,
            proxy_address: "127.0.0.1:9150".to_string(),
            timeout_secs: 90,
            accept_invalid_certs: true,
            disable_keepalive: true,
        }
    }
}

/// Fetch engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of in-flight network fetches
    #[serde(rename = "max-concurrent")]
    pub max_concurrent: u32,

    /// Cap on the size of a response body read into memory, in bytes
    #[serde(rename = "max-body-bytes")]
    pub max_body_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Request headers sent with every fetch
///
/// The defaults present a browser-like profile to reduce automated-traffic
/// blocking. Accept-Encoding is unset by default: the client then negotiates
/// compression itself and transparently decodes, so saved bodies are always
/// plaintext. Pinning it here stores bodies exactly as the server sent them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    #[serde(rename = "accept-encoding")]
    pub accept_encoding: Option<String>,

    /// Do-not-track header value
    pub dnt: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            accept_encoding: None,
            dnt: "1".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where fetched bodies are saved, one file per target host
    pub directory: PathBuf,

    /// Combined run log, mirroring everything written to the console
    #[serde(rename = "report-path")]
    pub report_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("scraped"),
            report_path: PathBuf::from("scan_report.log"),
        }
    }
}

/// Proxy connectivity self-check configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelfcheckConfig {
    /// Probe the diagnostic endpoint before fetching
    pub enabled: bool,

    /// Diagnostic endpoint returning {"IsTor": bool, "IP": string}
    pub url: String,
}

impl Default for SelfcheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://check.torproject.org/api/ip".to_string(),
        }
    }
}
