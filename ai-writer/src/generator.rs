use job_scraper::JobRecord;

use crate::api::CompletionProvider;
use crate::models::{ApplicantDocuments, CustomizedApplication};
use crate::prompts;

/// Writes a resume and a cover letter for every scraped posting
pub struct ApplicationGenerator<P> {
    provider: P,
}

impl<P: CompletionProvider> ApplicationGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn generate(
        &self,
        record: &JobRecord,
        documents: &ApplicantDocuments,
    ) -> Result<CustomizedApplication, P::E> {
        let company_information = prompts::company_information(record);
        let resume_prompt =
            prompts::resume_prompt(record.description(), &company_information, &documents.resume);
        let cover_letter_prompt = prompts::cover_letter_prompt(
            record.description(),
            &company_information,
            &documents.resume,
            &documents.cover_letter,
        );
        log::debug!("Resume prompt for {}:\n{}", record.posting_url(), resume_prompt);
        log::debug!("Cover letter prompt for {}:\n{}", record.posting_url(), cover_letter_prompt);

        let resume = self
            .provider
            .complete(prompts::system_prompt(), &resume_prompt)
            .await?;
        let cover_letter = self
            .provider
            .complete(prompts::system_prompt(), &cover_letter_prompt)
            .await?;
        Ok(CustomizedApplication::new(
            record,
            prompts::unwrap_tagged(&resume, "resume").to_owned(),
            prompts::unwrap_tagged(&cover_letter, "cover_letter").to_owned(),
        ))
    }

    /// Generates applications one posting at a time. Placeholder records of postings that
    /// couldn't be fetched are skipped, so are postings the provider failed on.
    pub async fn generate_all(
        &self,
        records: &[JobRecord],
        documents: &ApplicantDocuments,
    ) -> Vec<CustomizedApplication> {
        let mut applications = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.is_fetch_failure() {
                log::warn!("Skipping {}, the posting could not be fetched", record.posting_url());
                continue;
            }
            log::info!(
                "Writing application {}/{}: {} at {}",
                i + 1,
                records.len(),
                record.title(),
                record.company()
            );
            match self.generate(record, documents).await {
                Ok(application) => applications.push(application),
                Err(e) => log::error!(
                    "Failed to generate application for {}: {}",
                    record.posting_url(),
                    e
                ),
            }
        }
        applications
    }
}
