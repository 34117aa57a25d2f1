// src/api.rs

use crate::errors::{ChatError, ChatResult};
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};

/// Fixed text shown in place of a reply when anything on the fetch path
/// fails. Failure detail stays in the log file and never reaches the user.
pub const ERROR_REPLY: &str = "Error getting response from assistant.";

/// Issues one outbound request per user submission and produces exactly one
/// bot reply text per call, whatever the outcome.
pub struct ReplyFetcher {
    client: Client,
    endpoint: String,
}

impl ReplyFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Infallible by construction: transport failures, non-2xx statuses and
    /// malformed payloads all collapse to [`ERROR_REPLY`].
    pub async fn fetch_reply(&self, text: &str) -> String {
        match self.request_reply(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("reply fetch failed: {}", e);
                ERROR_REPLY.to_string()
            }
        }
    }

    async fn request_reply(&self, text: &str) -> ChatResult<String> {
        let payload = json!({ "message": text });

        debug!("POST {} ({} byte message)", self.endpoint, text.len());
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::api_error(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::api_error(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ChatError::api_error(format!("failed to decode response: {}", e)))?;

        // The reply lives at response.content[0].text; anything else in the
        // payload is ignored.
        body["response"]["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ChatError::api_error("response missing reply text"))
    }
}
