//! Black-box tests against the real `marquee` binary: spawn it with a
//! temp config, poll until it answers, then talk to it over HTTP.

use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// A spawned server plus the temp files keeping it alive.
struct RunningServer {
    child: tokio::process::Child,
    base: String,
    _config: NamedTempFile,
    _db_dir: TempDir,
}

impl RunningServer {
    /// Spawn the binary on a fresh port with a throwaway database and wait
    /// until its health endpoint answers.
    async fn start() -> Self {
        let port = get_available_port();
        let db_dir = TempDir::new().unwrap();

        let config_content = format!(
            r#"
[auth]
method = "none"

[server]
host = "127.0.0.1"
port = {}

[database]
path = "{}"
"#,
            port,
            db_dir.path().join("marquee.db").display()
        );

        let mut config = NamedTempFile::new().unwrap();
        config.write_all(config_content.as_bytes()).unwrap();
        config.flush().unwrap();

        let child = tokio::process::Command::new(env!("CARGO_BIN_EXE_marquee"))
            .env("MARQUEE_CONFIG", config.path())
            .env("RUST_LOG", "error") // Quiet logs during tests
            .kill_on_drop(true)
            .spawn()
            .expect("Failed to spawn server");

        let client = Client::new();
        let mut ready = false;
        for _ in 0..40 {
            if client
                .get(format!("http://127.0.0.1:{}/api/v1/health", port))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
            sleep(Duration::from_millis(50)).await;
        }
        assert!(ready, "Server did not start in time");

        Self {
            child,
            base: format!("http://127.0.0.1:{}/api/v1", port),
            _config: config,
            _db_dir: db_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn stop(mut self) {
        self.child.kill().await.ok();
    }
}

/// Run the binary against the given config path; it must exit non-zero.
async fn expect_startup_failure(config_path: &std::path::Path) {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_marquee"))
            .env("MARQUEE_CONFIG", config_path)
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = RunningServer::start().await;

    let response = Client::new()
        .get(server.url("/health"))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));

    server.stop().await;
}

#[tokio::test]
async fn test_config_endpoint_returns_sanitized() {
    let server = RunningServer::start().await;

    let response = Client::new()
        .get(server.url("/config"))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["auth"]["method"], "none");
    assert_eq!(json["auth"]["api_key_configured"], false);
    assert_eq!(json["catalog"]["match_mode"], "substring");

    server.stop().await;
}

#[tokio::test]
async fn test_movie_roundtrip_over_the_wire() {
    let server = RunningServer::start().await;
    let client = Client::new();

    // Create
    let response = client
        .post(server.url("/movies"))
        .json(&serde_json::json!({ "title": "The Dark Knight", "release_year": 2008 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["slug"], "the-dark-knight");

    // Read back by slug
    let response = client
        .get(server.url("/movies/the-dark-knight"))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let fetched: serde_json::Value = response.json().await.unwrap();
    assert_eq!(fetched["title"], "The Dark Knight");
    assert_eq!(fetched["view_count"], 1);

    // Metrics are served as Prometheus text
    let response = client
        .get(server.url("/metrics"))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("marquee_movies_total 1"));

    server.stop().await;
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    expect_startup_failure(std::path::Path::new("/nonexistent/config.toml")).await;
}

#[tokio::test]
async fn test_missing_auth_section_exits_with_error() {
    let config_without_auth = r#"
[server]
port = 8080
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_without_auth.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    expect_startup_failure(temp_file.path()).await;
}
