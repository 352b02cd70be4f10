//! End-to-end tests for the fetch engine
//!
//! These tests use wiremock to stand in for remote servers and drive the
//! full fetch cycle: scheduling, classification, persistence, statistics.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use torfetch::config::Config;
use torfetch::fetch;
use torfetch::stats::{RunStats, StatsSnapshot};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Direct-connection config writing into the given output directory
fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.transport.use_proxy = false;
    config.transport.timeout_secs = 2;
    config.output.directory = output_dir.to_path_buf();
    config.selfcheck.enabled = false;
    config
}

/// Runs the full engine over the targets and returns the final counters
async fn run_targets(config: &Config, targets: Vec<String>) -> StatsSnapshot {
    let client = fetch::build_http_client(config).expect("failed to build client");
    let stats = Arc::new(RunStats::new(targets.len() as u64));

    fetch::run(
        client,
        Arc::new(config.clone()),
        Arc::clone(&stats),
        targets,
    )
    .await;

    stats.snapshot()
}

/// Output filename the engine derives for a mock server's base URI
fn saved_file_name(base_uri: &str) -> String {
    let url = Url::parse(base_uri).expect("mock server uri");
    fetch::target_file_name(&url).expect("mock server uri has a host")
}

fn files_in(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect()
}

#[tokio::test]
async fn test_success_saves_exact_bytes() {
    let server = MockServer::start().await;
    let body = "<html><body>saved page</body></html>";

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let snapshot = run_targets(&config, vec![format!("{}/", server.uri())]).await;

    assert_eq!(snapshot.succeeded, 1);
    assert_eq!(snapshot.warnings, 0);
    assert_eq!(snapshot.failed, 0);
    assert_eq!(snapshot.total_bytes, body.len() as u64);

    let saved = dir.path().join(saved_file_name(&server.uri()));
    let on_disk = std::fs::read(&saved).expect("saved file exists");
    assert_eq!(on_disk, body.as_bytes());
    // The byte counter matches the on-disk length exactly
    assert_eq!(snapshot.total_bytes, on_disk.len() as u64);
}

#[tokio::test]
async fn test_http_404_is_a_warning_and_writes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let snapshot = run_targets(&config, vec![format!("{}/missing", server.uri())]).await;

    assert_eq!(snapshot.warnings, 1);
    assert_eq!(snapshot.succeeded, 0);
    assert_eq!(snapshot.failed, 0);
    assert_eq!(snapshot.total_bytes, 0);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_a_failure() {
    // Grab a port that answered once, then close it
    let server = MockServer::start().await;
    let dead_uri = server.uri();
    drop(server);

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let snapshot = run_targets(&config, vec![format!("{}/", dead_uri)]).await;

    assert_eq!(snapshot.failed, 1);
    assert_eq!(snapshot.succeeded, 0);
    assert_eq!(snapshot.warnings, 0);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_timeout_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.transport.timeout_secs = 1;

    let snapshot = run_targets(&config, vec![format!("{}/slow", server.uri())]).await;

    assert_eq!(snapshot.failed, 1);
    assert_eq!(snapshot.succeeded, 0);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_invalid_url_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    // No host component at all
    let snapshot = run_targets(&config, vec!["http://".to_string()]).await;

    assert_eq!(snapshot.failed, 1);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_body_over_cap_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/huge"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.fetch.max_body_bytes = 64;

    let snapshot = run_targets(&config, vec![format!("{}/huge", server.uri())]).await;

    assert_eq!(snapshot.failed, 1);
    assert_eq!(snapshot.succeeded, 0);
    // Never a truncated file
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_same_host_targets_last_writer_wins() {
    let server = MockServer::start().await;
    let body_a = "a".repeat(1024);
    let body_b = "b".repeat(2048);

    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_a.clone()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_b.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let snapshot = run_targets(
        &config,
        vec![
            format!("{}/first", server.uri()),
            format!("{}/second", server.uri()),
        ],
    )
    .await;

    assert_eq!(snapshot.succeeded, 2);
    assert_eq!(snapshot.failed, 0);

    // Both targets share a host, hence one file; its content is exactly one
    // of the two bodies, never a mix of both
    let files = files_in(dir.path());
    assert_eq!(files.len(), 1);
    let content = std::fs::read_to_string(&files[0]).unwrap();
    assert!(content == body_a || content == body_b);
}

#[tokio::test]
async fn test_conservation_over_a_mixed_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let refused = MockServer::start().await;
    let dead_uri = refused.uri();
    drop(refused);

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let snapshot = run_targets(
        &config,
        vec![
            format!("{}/ok", server.uri()),
            format!("{}/gone", server.uri()),
            "http://".to_string(),
            format!("{}/", dead_uri),
        ],
    )
    .await;

    assert_eq!(snapshot.total, 4);
    assert_eq!(snapshot.succeeded, 1);
    assert_eq!(snapshot.warnings, 1);
    assert_eq!(snapshot.failed, 2);
    assert_eq!(
        snapshot.succeeded + snapshot.warnings + snapshot.failed,
        snapshot.total
    );
}
