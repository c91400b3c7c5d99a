//! Language-model explanations over an OpenAI-compatible chat API.
//!
//! The model is told the status and findings and asked only to explain them.
//! A completion cut off by the token limit is continued in a further request,
//! up to the step budget.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult, ProviderError};
use crate::models::ExplanationSource;

use super::{AuthoredExplanation, ExplanationProvider, ExplanationRequest};

const SYSTEM_PROMPT: &str = "You are a compliance auditor for weekly certified payrolls (WCPs) \
under prevailing-wage (DBWD) rules. The compliance status and findings have already been \
decided by a rules engine. Explain them to a payroll officer in plain language. Do not change, \
add or dispute the status or findings. Cite each finding. Reply with the explanation only.";

/// Connection settings for [`LanguageModelExplainer`].
#[derive(Debug, Clone)]
pub struct LanguageModelOptions {
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Bearer token.
    pub api_key: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Token limit per completion request.
    pub max_tokens: u32,
    /// Timeout for a single HTTP request.
    pub request_timeout: Duration,
}

/// Explanation provider backed by a chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct LanguageModelExplainer {
    client: Client,
    options: LanguageModelOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
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
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: u64,
}

impl LanguageModelExplainer {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Internal`] if the HTTP client cannot be built.
    pub fn new(options: LanguageModelOptions) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(options.request_timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EngineError::Internal {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, options })
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.options.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatResponse, ProviderError> {
        let url = format!(
            "{}/chat/completions",
            self.options.base_url.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &self.options.model,
            messages,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.options.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_ms: self.options.request_timeout.as_millis() as u64,
                    }
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &text));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ExplanationProvider for LanguageModelExplainer {
    fn name(&self) -> &'static str {
        "language_model"
    }

    async fn author(
        &self,
        request: &ExplanationRequest<'_>,
    ) -> Result<AuthoredExplanation, ProviderError> {
        let mut messages = vec![
            ChatMessage::new("system", SYSTEM_PROMPT),
            ChatMessage::new("user", user_prompt(request)),
        ];
        let mut text = String::new();
        let mut token_usage = 0;

        for step in 1..=request.max_steps.max(1) {
            let response = self.complete(&messages).await?;
            token_usage += response.usage.map(|u| u.total_tokens).unwrap_or(0);

            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::InvalidResponse("no choices returned".to_string()))?;
            let content = choice.message.content.unwrap_or_default();
            text.push_str(&content);

            debug!(
                step,
                finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
                token_usage,
                "Explanation completion step finished"
            );

            if choice.finish_reason.as_deref() != Some("length") {
                break;
            }
            messages.push(ChatMessage::new("assistant", content));
            messages.push(ChatMessage::new("user", "Continue."));
        }

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "empty explanation".to_string(),
            ));
        }

        Ok(AuthoredExplanation {
            text,
            token_usage,
            source: ExplanationSource::LanguageModel,
        })
    }
}

fn user_prompt(request: &ExplanationRequest<'_>) -> String {
    let findings = if request.findings.is_empty() {
        "none".to_string()
    } else {
        request
            .findings
            .iter()
            .map(|f| format!("- {}: {}", f.kind, f.detail))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Role: {}\nHours: {}\nWage: ${}/hr\nStatus: {}\nFindings:\n{}",
        request.record.role,
        request.record.hours.normalize(),
        request.record.wage_display(),
        request.status,
        findings
    )
}

fn classify_failure(status: StatusCode, body: &str) -> ProviderError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        if body.contains("insufficient_quota") {
            ProviderError::QuotaExceeded
        } else {
            ProviderError::RateLimited
        }
    } else {
        ProviderError::Upstream {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        }
    }
}
