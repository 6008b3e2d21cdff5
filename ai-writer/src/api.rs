use std::error::Error;
use std::path::Path;

use async_trait::async_trait;

/// Single-shot text generation from a system and a user prompt
#[async_trait]
pub trait CompletionProvider {
    type E: Error + Send + Sync;
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::E>;
}

/// Reads the plain text of an applicant document, one paragraph per line
pub trait DocumentLoader {
    fn load_text(&self, path: &Path) -> crate::Result<String>;
}
