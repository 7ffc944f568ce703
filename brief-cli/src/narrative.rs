//! Narrative generation: one digest entry per article from a chat-completions model.

use crate::error::{PipelineError, Result};
use crate::feed::Article;
use brief_config::NarrativeConfig;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(title|text|url)\}").expect("placeholder pattern is valid"));

/// Writes the Markdown entry for one article.
pub trait Narrator {
    fn narrate(&self, article: &Article) -> Result<String>;
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Substitute `{title}`, `{text}` and `{url}` in one pass, so placeholders inside the
/// article itself are left alone.
pub fn render_prompt(template: &str, article: &Article, max_input_chars: usize) -> String {
    let text = truncate_chars(article.text(), max_input_chars);
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "title" => article.title.clone(),
            "text" => text.to_string(),
            _ => article.url().to_string(),
        })
        .into_owned()
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI-compatible `chat/completions` client.
#[derive(Debug, Clone)]
pub struct OpenAiNarrator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    prompt: String,
    max_input_chars: usize,
}

impl OpenAiNarrator {
    /// Build from configuration, reading the key from `api_key_env`.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PipelineError::MissingApiKey(config.api_key_env.clone()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            prompt: config.prompt.clone(),
            max_input_chars: config.max_input_chars,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Narrator for OpenAiNarrator {
    fn narrate(&self, article: &Article) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(render_prompt(&self.prompt, article, self.max_input_chars)),
            }],
            temperature: self.temperature,
        };
        debug!(model = %self.model, title = %article.title, "requesting narrative");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PipelineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(PipelineError::EmptyResponse)
    }
}
