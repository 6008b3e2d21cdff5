use async_openai::error::OpenAIError;
use thiserror::Error;

use crate::models::CompletionSettings;

pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Error)]
pub enum Error {
    #[error("OpenAI error: '{0}'")]
    OpenAI(#[from] OpenAIError),
    #[error("Response contained no choices")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Chat completion client, authenticates with the given key
pub struct Client {
    pub(super) client: async_openai::Client,
    pub(super) settings: CompletionSettings,
}

impl Client {
    pub fn new(api_key: String) -> Self {
        Self::with_client(async_openai::Client::new().with_api_key(api_key))
    }

    pub fn with_client(client: async_openai::Client) -> Self {
        Self {
            client,
            settings: CompletionSettings::new(DEFAULT_MODEL),
        }
    }

    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }
}
