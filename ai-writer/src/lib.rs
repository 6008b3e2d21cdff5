pub mod anthropic;
pub mod api;
pub mod documents;
pub mod generator;
pub mod models;
pub mod openai;
pub mod prompts;
pub mod types;

pub use api::{CompletionProvider, DocumentLoader};
pub use generator::ApplicationGenerator;
pub use models::{ApplicantDocuments, CompletionSettings, CustomizedApplication};
pub use types::{Error, Result};
