use std::path::Path;

use ai_writer::documents::AnyDocumentLoader;
use ai_writer::{anthropic, openai};
use ai_writer::{ApplicantDocuments, ApplicationGenerator, CompletionProvider, CompletionSettings};
use anyhow::{Context, Result};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Anthropic,
    Openai,
}

impl Provider {
    fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Openai => "OPENAI_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => anthropic::DEFAULT_MODEL,
            Provider::Openai => openai::DEFAULT_MODEL,
        }
    }
}

pub struct GenerateArgs<'a> {
    pub records: &'a Path,
    pub resume: &'a Path,
    pub cover_letter: &'a Path,
    pub output: &'a Path,
    pub provider: Provider,
    pub model: Option<String>,
}

async fn run<P: CompletionProvider>(provider: P, args: &GenerateArgs<'_>) -> Result<()> {
    let documents = ApplicantDocuments::load(&AnyDocumentLoader, args.resume, args.cover_letter)
        .context("Failed to load applicant documents")?;
    let records = persistence::load_records(args.records)
        .await
        .with_context(|| format!("Failed to load jobs from {}", args.records.display()))?;
    let applications = ApplicationGenerator::new(provider)
        .generate_all(&records, &documents)
        .await;
    log::info!("Generated {} of {} applications", applications.len(), records.len());
    persistence::save_applications(args.output, &applications)
        .await
        .with_context(|| format!("Failed to save applications to {}", args.output.display()))
}

pub async fn generate(args: GenerateArgs<'_>) -> Result<()> {
    let api_key = std::env::var(args.provider.api_key_var())
        .with_context(|| format!("{} not set", args.provider.api_key_var()))?;
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| args.provider.default_model().to_owned());
    let settings = CompletionSettings::new(model);
    log::info!("Generating applications with {:?} model {}", args.provider, settings.model);
    match args.provider {
        Provider::Anthropic => {
            let client = anthropic::Client::new(api_key)?.with_settings(settings);
            run(client, &args).await
        }
        Provider::Openai => {
            let client = openai::Client::new(api_key).with_settings(settings);
            run(client, &args).await
        }
    }
}
