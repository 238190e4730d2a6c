//! Common test utilities for exercising the HTTP surface in-process.
//!
//! The fixture builds the real router over a temp-file SQLite store and
//! drives it with `tower::ServiceExt::oneshot`, so tests cover routing,
//! extractors, middleware and serialization without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use marquee_core::{
    create_authenticator, AuthConfig, AuthMethod, CatalogConfig, CatalogService, Config,
    DatabaseConfig, MatchMode, PageLimits, ServerConfig, SqliteMovieStore,
};
use marquee_server::api::create_router;
use marquee_server::state::AppState;

/// In-process server fixture.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Keeps the database directory alive for the fixture's lifetime
    _temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for the test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub auth_method: AuthMethod,
    pub api_key: Option<String>,
    pub match_mode: MatchMode,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            auth_method: AuthMethod::None,
            api_key: None,
            match_mode: MatchMode::Substring,
        }
    }
}

impl TestConfig {
    /// Fixture requiring the given API key on protected routes.
    pub fn with_api_key(key: &str) -> Self {
        Self {
            auth_method: AuthMethod::ApiKey,
            api_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    /// Fixture with exact genre/director matching.
    pub fn with_exact_matching() -> Self {
        Self {
            match_mode: MatchMode::Exact,
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with open (none) auth.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            auth: AuthConfig {
                method: test_config.auth_method,
                api_key: test_config.api_key,
            },
            server: ServerConfig::default(),
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            pagination: PageLimits::default(),
            catalog: CatalogConfig {
                match_mode: test_config.match_mode,
            },
        };

        let store = Arc::new(SqliteMovieStore::new(&db_path).expect("Failed to open movie store"));
        let service = Arc::new(CatalogService::new(
            store,
            config.pagination.clone(),
            config.catalog.match_mode,
        ));
        let authenticator =
            Arc::from(create_authenticator(&config.auth).expect("Failed to create authenticator"));

        let state = Arc::new(AppState::new(config, service, authenticator));

        Self {
            router: create_router(state),
            _temp_dir: temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, &[]).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), &[]).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body), &[]).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None, &[]).await
    }

    /// Send a request with extra headers (for auth tests).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        for (name, value) in headers {
            request_builder = request_builder.header(*name, *value);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Send a POST request with a raw string body (for malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Send a GET request and return the raw body text (for /metrics).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }
}
