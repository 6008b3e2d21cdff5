use std::time::Duration;

use thiserror::Error;

use crate::models::CompletionSettings;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub(super) const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub(super) const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Response contained no text")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Anthropic Messages API client
pub struct Client {
    pub(super) client: reqwest::Client,
    pub(super) api_key: String,
    pub(super) api_url: String,
    pub(super) settings: CompletionSettings,
}

impl Client {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self::with_client(api_key, client))
    }

    pub fn with_client(api_key: String, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key,
            api_url: MESSAGES_URL.to_owned(),
            settings: CompletionSettings::new(DEFAULT_MODEL),
        }
    }

    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
