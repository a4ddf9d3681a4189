//! OpenAI-compatible chat completions classifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::classifier::{parse_classification, Classifier, ClassifyError};
use crate::config::{Config, ResponseFormat, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::models::{BookClassification, Conversation, ConversationMessage};
use crate::prompt::render_system_prompt;
use crate::utils::HttpClient;

/// Schema name sent with strict structured-output requests.
const SCHEMA_NAME: &str = "book_classification";

/// Longest slice of an error body kept in a transport error message.
const MAX_ERROR_BODY: usize = 500;

/// Classifier backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiClassifier {
    client: Arc<HttpClient>,
    api_key: String,
    model: String,
    base_url: String,
    response_format: ResponseFormat,
    temperature: Option<f32>,
}

impl OpenAiClassifier {
    /// Create a classifier for the given credential and model
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ClassifyError> {
        let client = HttpClient::new()
            .map_err(|e| ClassifyError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(Arc::new(client), api_key, model))
    }

    /// Create with a custom HTTP client
    pub fn with_client(
        client: Arc<HttpClient>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            response_format: ResponseFormat::default(),
            temperature: None,
        }
    }

    /// Create from application configuration.
    ///
    /// Fails with [`ClassifyError::Config`] when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, ClassifyError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ClassifyError::Config(
                "No API key configured. Set OPENAI_API_KEY or api_key in the config file."
                    .to_string(),
            )
        })?;

        let client = HttpClient::with_timeout(config.timeout())
            .map_err(|e| ClassifyError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let model = if config.model.is_empty() {
            DEFAULT_MODEL
        } else {
            config.model.as_str()
        };

        let mut classifier = Self::with_client(Arc::new(client), api_key, model)
            .with_base_url(&config.base_url)
            .with_response_format(config.response_format);
        classifier.temperature = config.temperature;
        Ok(classifier)
    }

    /// Point at a different API base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Choose how the service is asked to shape its output
    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The model identifier requests are sent with
    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn response_format_value(&self) -> Value {
        match self.response_format {
            ResponseFormat::JsonObject => json!({ "type": "json_object" }),
            ResponseFormat::JsonSchema => json!({
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "strict": true,
                    "schema": BookClassification::json_schema(),
                }
            }),
        }
    }

    fn build_request<'a>(&'a self, conversation: &Conversation) -> ChatRequest<'a> {
        let system = ConversationMessage::system(render_system_prompt(
            &conversation.system().content,
        ));

        ChatRequest {
            model: &self.model,
            messages: vec![system, conversation.user().clone()],
            temperature: self.temperature,
            response_format: self.response_format_value(),
        }
    }
}

impl std::fmt::Debug for OpenAiClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClassifier")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("response_format", &self.response_format)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ConversationMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_format: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn classify(
        &self,
        conversation: &Conversation,
    ) -> Result<BookClassification, ClassifyError> {
        let request = self.build_request(conversation);
        tracing::debug!(
            model = %self.model,
            url = %self.completions_url(),
            "Sending classification request"
        );

        let response = self
            .client
            .client()
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(ClassifyError::Transport(format!(
                "HTTP {}: {}",
                status, excerpt
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Transport(format!("Invalid response body: {}", e)))?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            ClassifyError::SchemaViolation("response contained no choices".to_string())
        })?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!("Completion was truncated by the token limit");
        }

        if let Some(refusal) = choice.message.refusal {
            return Err(ClassifyError::SchemaViolation(format!(
                "model refused: {}",
                refusal
            )));
        }

        let content = choice.message.content.ok_or_else(|| {
            ClassifyError::SchemaViolation("response message had no content".to_string())
        })?;
        tracing::debug!("Raw classification reply: {}", content);

        parse_classification(&content)
    }
}
