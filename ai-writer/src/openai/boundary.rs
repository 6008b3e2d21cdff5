use async_openai::types::{
    ChatCompletionRequestMessageArgs, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    Role,
};
use async_trait::async_trait;

use super::api::{Client, Error, Result};
use crate::api::CompletionProvider;

impl Client {
    fn request(&self, system_prompt: &str, user_prompt: &str) -> Result<CreateChatCompletionRequest> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .messages([
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::System)
                    .content(system_prompt)
                    .build()?,
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::User)
                    .content(user_prompt)
                    .build()?,
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl CompletionProvider for Client {
    type E = Error;

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = self.request(system_prompt, user_prompt)?;
        log::debug!("Sending prompt to {} ({} chars)", self.settings.model, user_prompt.len());
        let response = self.client.chat().create(request).await?;
        let answer = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(Error::EmptyContent)?;
        if answer.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(answer)
    }
}
