use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, Message, Role};

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Build a provider with a client-level request timeout. The timeout is
    /// the only defense against a hung upstream: there are no retries.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Build the request body for the Gemini generateContent API.
    /// Gemini carries the system prompt in a separate `system_instruction`
    /// field and names the assistant role "model".
    fn build_request_body(
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> serde_json::Value {
        let system_msg = messages
            .iter()
            .find(|m| matches!(m.role, Role::System))
            .map(|m| m.content.clone());

        let contents: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| !matches!(m.role, Role::System))
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                        Role::System => unreachable!(),
                    },
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_tokens,
            },
        });

        if let Some(system) = system_msg {
            body["system_instruction"] = json!({
                "parts": [{ "text": system }],
            });
        }

        body
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key,
        );

        let body = Self::build_request_body(&messages, temperature, max_tokens);

        debug!("Gemini request to model={}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                LlmError::ParseError("missing candidates[0].content.parts[0].text".into())
            })?
            .to_string();

        Ok(content)
    }
}
