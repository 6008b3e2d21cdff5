use std::path::Path;

use job_scraper::{JobRecord, PostingLink};
use serde::{Deserialize, Serialize};

use crate::api::DocumentLoader;

/// Generation parameters shared by every completion provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u16,
    pub temperature: f32,
}

impl CompletionSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

/// The applicant's current resume and a previous cover letter, as plain text
#[derive(Debug, Clone)]
pub struct ApplicantDocuments {
    pub resume: String,
    pub cover_letter: String,
}

impl ApplicantDocuments {
    pub fn load(
        loader: &impl DocumentLoader,
        resume_path: &Path,
        cover_letter_path: &Path,
    ) -> crate::Result<Self> {
        Ok(Self {
            resume: loader.load_text(resume_path)?,
            cover_letter: loader.load_text(cover_letter_path)?,
        })
    }
}

/// Resume and cover letter written for one posting
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomizedApplication {
    pub posting_url: PostingLink,
    pub title: String,
    pub company: String,
    pub customized_resume: String,
    pub customized_cover_letter: String,
}

impl CustomizedApplication {
    pub fn new(record: &JobRecord, customized_resume: String, customized_cover_letter: String) -> Self {
        Self {
            posting_url: record.posting_url().clone(),
            title: record.title().to_owned(),
            company: record.company().to_owned(),
            customized_resume,
            customized_cover_letter,
        }
    }
}
