//! Shared HTTP plumbing for the chat/history service.

use chatgate_core::config::ClientConfig;
use chatgate_core::{ChatGateError, Result};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Base URL, connection pool and timeout shared by every API client.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(config.service_url.clone());
        match config.request_timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    /// Sets a per-request timeout. Requests wait indefinitely by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ChatGateError::config(format!("Invalid service URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ChatGateError::config(format!("Service URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        let builder = self.client.request(method, url);
        Ok(match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        })
    }

    /// Sends the request; only transport failures are errors.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        builder
            .send()
            .await
            .map_err(|e| ChatGateError::network(format!("Request to service failed: {e}")))
    }

    /// Sends the request and turns any non-success status into
    /// `ChatGateError::Service`.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.execute(builder).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            Err(ChatGateError::service(
                status.as_u16(),
                error_detail(response).await,
            ))
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        parse_json(response).await
    }
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| ChatGateError::Serialization {
        format: "JSON".to_string(),
        message: format!("Failed to parse service response: {e}"),
    })
}

/// Extracts a readable message from an error response.
pub(crate) async fn error_detail(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        return match parsed.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        };
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body
    }
}
