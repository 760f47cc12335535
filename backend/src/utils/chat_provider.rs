use async_trait::async_trait;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion;
use thiserror::Error;

use crate::config::ChatConfig;

/// Shown to the visitor whenever the assistant can't produce a real answer.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again shortly or get in touch through the contact page.";

const ASSISTANT_PROMPT: &str = r#"You are the website assistant for a UK analytics consultancy.
The consultancy helps organisations with data strategy, dashboards and reporting, data engineering and applied machine learning.
Answer questions about these services briefly and in plain British English.
If a visitor wants a quote, a proposal or to speak with someone, point them to the contact page or the booking link.
Never invent prices, client names or case-study figures. If you don't know, say so."#;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat provider is not configured")]
    NotConfigured,
    #[error("failed to create chat client: {0}")]
    Client(String),
    #[error("chat completion failed: {0}")]
    Completion(String),
    #[error("chat completion returned no content")]
    EmptyReply,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, message: String) -> Result<String, ChatError>;
}

/// Forwards visitor messages to an OpenAI-compatible chat completions endpoint.
pub struct OpenRouterProvider {
    config: ChatConfig,
}

impl OpenRouterProvider {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    fn create_client(&self) -> Result<OpenAIClient, ChatError> {
        OpenAIClient::builder()
            .with_endpoint(self.config.endpoint.clone())
            .with_api_key(self.config.api_key.clone())
            .build()
            .map_err(|e| ChatError::Client(e.to_string()))
    }
}

pub(crate) fn build_messages(message: &str) -> Vec<chat_completion::ChatCompletionMessage> {
    vec![
        chat_completion::ChatCompletionMessage {
            role: chat_completion::MessageRole::system,
            content: chat_completion::Content::Text(ASSISTANT_PROMPT.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        chat_completion::ChatCompletionMessage {
            role: chat_completion::MessageRole::user,
            content: chat_completion::Content::Text(message.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn complete(&self, message: String) -> Result<String, ChatError> {
        let client = self.create_client()?;
        let request = chat_completion::ChatCompletionRequest::new(
            self.config.model.clone(),
            build_messages(&message),
        )
        .temperature(0.3)
        .max_tokens(400);

        let result = client
            .chat_completion(request)
            .await
            .map_err(|e| ChatError::Completion(e.to_string()))?;

        let reply = result
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();
        if reply.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(reply)
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledProvider;

#[async_trait]
impl ChatProvider for DisabledProvider {
    async fn complete(&self, _message: String) -> Result<String, ChatError> {
        Err(ChatError::NotConfigured)
    }
}
