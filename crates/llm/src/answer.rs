//! Grounded answer generation.
//!
//! Composes a prompt from the retrieved document sections and the question,
//! instructing the model to answer strictly from the supplied context and to
//! say so when the answer is not there, then hands it to an [`LlmProvider`].

use std::time::Duration;

use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message, Role};
use crate::providers::gemini::GeminiProvider;

/// System prompt constraining the model to the supplied document sections.
const SYSTEM_PROMPT: &str = "\
You are an assistant that answers questions about an uploaded document.

Rules:
1. Answer ONLY from the document sections provided in the user message.
2. If the answer is not in the sections, say exactly: \"I cannot find this \
information in the document.\" Do not guess or use outside knowledge.
3. Quote numbers, dates, and names exactly as they appear in the document.
4. Be concise; use bullet points when listing multiple items.";

/// Separator between document sections in the user prompt.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

pub struct AnswerGenerator {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerGenerator {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the Gemini provider.
    pub fn from_config(config: &docqa_core::config::LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .google_api_key
            .clone()
            .ok_or_else(|| LlmError::NotConfigured("GOOGLE_API_KEY is not set".into()))?;
        let provider = GeminiProvider::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self::new(
            Box::new(provider),
            config.temperature,
            config.max_tokens,
        ))
    }

    /// Answer `question` using only the supplied document `sections`.
    ///
    /// Any provider failure propagates as [`LlmError`]; there is no local
    /// fallback answer.
    pub async fn answer(&self, question: &str, sections: &[&str]) -> Result<String, LlmError> {
        let user_prompt = build_user_prompt(question, sections);

        info!(
            "Generating answer ({} sections, {} prompt chars)",
            sections.len(),
            user_prompt.len()
        );

        let messages = vec![
            Message {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            Message {
                role: Role::User,
                content: user_prompt,
            },
        ];

        let response = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await?;

        debug!("LLM response: {} chars", response.len());
        Ok(response.trim().to_string())
    }
}

/// Assemble the user prompt: sections, separator lines, then the question.
fn build_user_prompt(question: &str, sections: &[&str]) -> String {
    format!(
        "DOCUMENT SECTIONS:\n{}\n\nQUESTION: {}\n\nANSWER (based only on the sections above):",
        sections.join(SECTION_SEPARATOR),
        question
    )
}
