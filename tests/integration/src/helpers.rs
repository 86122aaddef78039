//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, driving them with
//! cookie-keeping browsers, and checking responses.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use brevity_common::AppConfig;
use brevity_web::{create_app, create_app_state, run_server};
use reqwest::{header, multipart, redirect::Policy, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::TestUser;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    _static_dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with its own static directory
    pub async fn start() -> Result<Self> {
        let static_dir = tempfile::tempdir()?;
        let config = test_config(static_dir.path().to_path_buf())?;

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to any free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            run_server(app, listener).await.ok();
        });

        Ok(Self {
            addr,
            _static_dir: static_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A fresh client with an empty cookie jar
    pub fn browser(&self) -> Result<Browser> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Browser {
            client,
            base_url: self.base_url(),
        })
    }
}

/// One visitor: a client that keeps cookies and never follows redirects
pub struct Browser {
    client: Client,
    base_url: String,
}

impl Browser {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with a URL-encoded body
    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Make a POST request with a multipart body
    pub async fn post_multipart(&self, path: &str, form: multipart::Form) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?)
    }

    /// Submit the registration form for `user`
    pub async fn register(&self, user: &TestUser) -> Result<Response> {
        self.post_form("/register", &user.registration_form()).await
    }

    /// Submit the login form for `user`
    pub async fn login(&self, user: &TestUser) -> Result<Response> {
        self.post_form("/login", &user.login_form()).await
    }

    /// Register then log in, failing unless both succeed
    pub async fn sign_up(&self, user: &TestUser) -> Result<()> {
        assert_redirect(self.register(user).await?, "/login").await?;
        assert_redirect(self.login(user).await?, "/home").await?;
        Ok(())
    }
}

/// Create a test configuration
///
/// Only `DATABASE_URL` has to come from the environment.
pub fn test_config(static_dir: PathBuf) -> Result<AppConfig> {
    if std::env::var("PORT").is_err() {
        std::env::set_var("PORT", "0");
    }
    if std::env::var("SECRET_KEY").is_err() {
        std::env::set_var("SECRET_KEY", "integration-test-secret-key");
    }

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    config.database.max_connections = 5;
    config.database.min_connections = 1;
    config.database.migrations_dir =
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations"));
    config.storage.static_dir = static_dir;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    assert_page(response, expected_status).await.map(|_| ())
}

/// Assert response status and return the HTML body
pub async fn assert_page(response: Response, expected_status: StatusCode) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(body)
}

/// Assert a 303 to exactly `expected_location`
pub async fn assert_redirect(response: Response, expected_location: &str) -> Result<()> {
    let status = response.status();
    let location = location(&response);
    if status != StatusCode::SEE_OTHER || location.as_deref() != Some(expected_location) {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected 303 to {expected_location}, got {status} to {location:?}. Body: {body}"
        );
    }
    Ok(())
}

/// The `Location` header, if any
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Find the id of the post titled `title` on a listing page
pub fn find_post_id(html: &str, title: &str) -> Result<i64> {
    let anchor_end = html
        .find(&format!(">{title}</a>"))
        .with_context(|| format!("post {title:?} not listed"))?;
    let prefix = &html[..anchor_end];

    let marker = "href=\"/post/";
    let start = prefix
        .rfind(marker)
        .context("post link not found")?
        + marker.len();
    let digits: String = prefix[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    Ok(digits.parse()?)
}
