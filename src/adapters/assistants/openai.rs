//! OpenAI Assistants adapter - Implementation of AssistantService for the
//! Assistants v2 API.
//!
//! Covers the five thread/run endpoints a conversation turn touches. Every
//! request carries the bearer credential and the `OpenAI-Beta: assistants=v2`
//! protocol-version header.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let service = OpenAIAssistantService::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::domain::{MessagePart, MessageRole, Run, RunId, RunStatus, ThreadId, ThreadMessage};
use crate::ports::{AssistantError, AssistantService};

/// Protocol-version header required by the Assistants v2 endpoints.
const ASSISTANTS_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Configuration for the OpenAI Assistants adapter.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Assistants API adapter.
pub struct OpenAIAssistantService {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIAssistantService {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn threads_url(&self) -> String {
        format!("{}/threads", self.config.base_url)
    }

    fn messages_url(&self, thread: &ThreadId) -> String {
        format!("{}/threads/{}/messages", self.config.base_url, thread)
    }

    fn runs_url(&self, thread: &ThreadId) -> String {
        format!("{}/threads/{}/runs", self.config.base_url, thread)
    }

    fn run_url(&self, thread: &ThreadId, run: &RunId) -> String {
        format!("{}/threads/{}/runs/{}", self.config.base_url, thread, run)
    }

    /// Attaches the credential and protocol headers common to every call.
    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header(ASSISTANTS_BETA_HEADER.0, ASSISTANTS_BETA_HEADER.1)
    }

    /// Sends a request, mapping transport failures.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AssistantError> {
        self.with_headers(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                AssistantError::Timeout
            } else if e.is_connect() {
                AssistantError::Network(format!("Connection failed: {}", e))
            } else {
                AssistantError::Network(e.to_string())
            }
        })
    }

    /// Turns a non-success response into a status error with its body kept
    /// for diagnostics.
    async fn check_status(&self, response: Response) -> Result<Response, AssistantError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AssistantError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Decodes a success response body.
    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, AssistantError> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AssistantService for OpenAIAssistantService {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let response = self
            .send(self.client.post(self.threads_url()).json(&json!({})))
            .await?;
        let thread: ThreadObject = self.decode(response).await?;
        Ok(ThreadId::new(thread.id))
    }

    async fn post_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        text: &str,
    ) -> Result<(), AssistantError> {
        let body = CreateMessageRequest {
            role,
            content: text,
        };
        let response = self
            .send(self.client.post(self.messages_url(thread)).json(&body))
            .await?;
        self.check_status(response).await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant_id: &str,
    ) -> Result<Run, AssistantError> {
        let body = CreateRunRequest { assistant_id };
        let response = self
            .send(self.client.post(self.runs_url(thread)).json(&body))
            .await?;
        let run: RunObject = self.decode(response).await?;
        Ok(Run::new(RunId::new(run.id), run.status))
    }

    async fn run_status(
        &self,
        thread: &ThreadId,
        run: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let response = self.send(self.client.get(self.run_url(thread, run))).await?;
        let run: RunObject = self.decode(response).await?;
        Ok(run.status)
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, AssistantError> {
        let response = self
            .send(self.client.get(self.messages_url(thread)))
            .await?;
        let list: MessageListObject = self.decode(response).await?;

        // The remote returns messages most recent first; preserved as-is.
        Ok(list
            .data
            .into_iter()
            .map(|message| {
                let parts = message
                    .content
                    .into_iter()
                    .map(|part| match part {
                        ContentPartObject::Text { text } => MessagePart::Text(text.value),
                        ContentPartObject::Other => MessagePart::Other,
                    })
                    .collect();
                ThreadMessage::new(message.role, parts)
            })
            .collect())
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: RunStatus,
}

#[derive(Debug, Deserialize)]
struct MessageListObject {
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    role: MessageRole,
    content: Vec<ContentPartObject>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPartObject {
    Text { text: TextValueObject },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct TextValueObject {
    value: String,
}
