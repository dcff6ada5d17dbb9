// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the image-generation service.
//!
//! All calls go through a single [`Client`] so the whole application shares
//! one connection pool, user agent and timeout. Responses from the two
//! structured endpoints (`/gerar`, `/galeria`) pass a content-type gate
//! before JSON parsing: a non-JSON body on a success status is reported as a
//! malformed response (a server misconfiguration), never as a parse crash.

pub mod models;

mod gallery;
mod generate;

pub use gallery::fetch_gallery;
pub use generate::{submit_generation, validate};

use crate::error::ApiError;
use models::HealthResponse;
use std::time::Duration;

const USER_AGENT: &str = concat!("Easel/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client bound to one server base URL.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Builds a client for the given server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed (e.g. no TLS backend available).
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Joins a path like `/gerar` onto the configured base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolves a server-relative URL (e.g. `/static/imagens_geradas/a.png`)
    /// against the base URL. Absolute URLs pass through untouched.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    /// Fetches raw image bytes, used for gallery thumbnails and downloads.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let absolute = self.absolute_url(url);
        tracing::debug!(url = %absolute, "fetching image bytes");

        let response = self
            .http
            .get(&absolute)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Transport(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Calls `GET /health` and reports server reachability.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.endpoint("/health");
        tracing::debug!(url = %url, "checking server health");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = read_structured_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

/// Applies the content-type gate, then returns the response body text.
///
/// Classification order matters: a JSON body is always handed to the caller
/// (the server reports its own failures as structured JSON on 4xx/5xx), a
/// non-JSON body on a failure status is a transport-level condition, and a
/// non-JSON body on a success status means the server is misconfigured.
pub(crate) async fn read_structured_body(
    response: reqwest::Response,
) -> Result<String, ApiError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    content_gate(status.is_success(), status.as_u16(), &content_type)?;

    response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Pure classification half of [`read_structured_body`].
fn content_gate(
    status_is_success: bool,
    status_code: u16,
    content_type: &str,
) -> Result<(), ApiError> {
    if content_type.contains("application/json") {
        return Ok(());
    }
    if !status_is_success {
        return Err(ApiError::Transport(format!("HTTP {}", status_code)));
    }
    let label = if content_type.is_empty() {
        "(none)"
    } else {
        content_type
    };
    Err(ApiError::MalformedResponse(format!(
        "unexpected content type `{}`",
        label
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_gate_accepts_json_with_charset() {
        assert!(content_gate(true, 200, "application/json; charset=utf-8").is_ok());
    }

    #[test]
    fn content_gate_accepts_json_on_error_status() {
        // Server-reported failures arrive as JSON on 4xx/5xx.
        assert!(content_gate(false, 500, "application/json").is_ok());
    }

    #[test]
    fn content_gate_flags_html_on_success_as_malformed() {
        let err = content_gate(true, 200, "text/html").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn content_gate_flags_html_on_error_as_transport() {
        let err = content_gate(false, 502, "text/html").unwrap_err();
        match err {
            ApiError::Transport(msg) => assert!(msg.contains("502")),
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[test]
    fn content_gate_reports_missing_content_type() {
        let err = content_gate(true, 200, "").unwrap_err();
        match err {
            ApiError::MalformedResponse(msg) => assert!(msg.contains("(none)")),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn absolute_url_resolution() {
        let client = Client::new("http://localhost:5000/", 30).expect("client builds");
        assert_eq!(
            client.absolute_url("/static/a.png"),
            "http://localhost:5000/static/a.png"
        );
        assert_eq!(
            client.absolute_url("http://cdn.example/b.png"),
            "http://cdn.example/b.png"
        );
        assert_eq!(client.endpoint("/gerar"), "http://localhost:5000/gerar");
    }
}
