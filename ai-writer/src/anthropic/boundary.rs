use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::api::{Client, Error, Result, API_VERSION};
use crate::api::CompletionProvider;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
impl CompletionProvider for Client {
    type E = Error;

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: u32::from(self.settings.max_tokens),
            temperature: self.settings.temperature,
            system: system_prompt,
            messages: [Message {
                role: "user",
                content: user_prompt,
            }],
        };
        log::debug!("Sending prompt to {} ({} chars)", self.settings.model, user_prompt.len());
        let resp = self
            .client
            .post(&self.api_url)
            .header("x-api-key", self.api_key.trim())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            log::error!("Anthropic returned {}: {}", status, message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        let parsed: MessagesResponse = resp.json().await?;
        let answer = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        if answer.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(answer)
    }
}
