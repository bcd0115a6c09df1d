//! ChatApiClient - forwards prompts to `POST /chat`.

use crate::service_client::ServiceClient;
use async_trait::async_trait;
use chatgate_core::Result;
use chatgate_core::chat::ChatService;
use chatgate_core::history::UserId;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatApiClient {
    service: ServiceClient,
}

impl ChatApiClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ChatService for ChatApiClient {
    /// A missing or null `response` field yields an empty string; the caller
    /// decides what to show for it.
    async fn chat(&self, prompt: &str, user: Option<UserId>) -> Result<String> {
        let request = self
            .service
            .request(Method::POST, &["chat"])?
            .json(&ChatRequest {
                prompt,
                user_id: user,
            });
        let body: ChatResponse = self.service.send_json(request).await?;
        let text = body.response.unwrap_or_default();
        tracing::debug!(chars = text.chars().count(), "chat response received");
        Ok(text)
    }
}
