use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Failed to scrape data from: '{0}', status: {1}")]
    RequestNotOk(String, reqwest::StatusCode),
    #[error("No page available for: '{0}'")]
    PageUnavailable(String),
    #[error("Invalid posting url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

pub const NO_TITLE: &str = "No title found";
pub const NO_COMPANY: &str = "No company found";
pub const NO_DESCRIPTION: &str = "No description found";
pub const NO_COMPENSATION: &str = "No compensation info found";
pub const FETCH_FAILED: &str = "Failed to fetch";
pub const PAGE_INACCESSIBLE: &str = "Could not access page";

/// An absolute URL pointing at a single job posting page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostingLink(Url);

impl PostingLink {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
            url: raw.to_owned(),
            reason: e.to_string(),
        })?;
        Self::try_from_url(url)
    }

    /// Resolves `reference` against `base`, so host-relative hrefs become absolute.
    pub fn resolve(base: &Url, reference: &str) -> Result<Self> {
        let url = base.join(reference).map_err(|e| Error::InvalidUrl {
            url: reference.to_owned(),
            reason: e.to_string(),
        })?;
        Self::try_from_url(url)
    }

    fn try_from_url(url: Url) -> Result<Self> {
        if url.host_str().map_or(true, str::is_empty) {
            return Err(Error::InvalidUrl {
                url: url.to_string(),
                reason: "missing host".to_owned(),
            });
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl Display for PostingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PostingLink {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PostingLink> for String {
    fn from(link: PostingLink) -> Self {
        link.0.into()
    }
}

/// The structured result of extracting a single posting.
/// Every field holds either extracted text or its sentinel, never an empty string.
/// Only built through [`JobRecord::new`], loading goes through the record store checks.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    posting_url: PostingLink,
    title: String,
    company: String,
    description: String,
    compensation_note: String,
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| sentinel.to_owned())
}

impl JobRecord {
    pub fn new(
        posting_url: PostingLink,
        title: Option<String>,
        company: Option<String>,
        description: Option<String>,
        compensation_note: Option<String>,
    ) -> Self {
        Self {
            posting_url,
            title: or_sentinel(title, NO_TITLE),
            company: or_sentinel(company, NO_COMPANY),
            description: or_sentinel(description, NO_DESCRIPTION),
            compensation_note: or_sentinel(compensation_note, NO_COMPENSATION),
        }
    }

    /// Placeholder for a posting whose page could not be fetched.
    pub fn fetch_failed(posting_url: PostingLink) -> Self {
        Self {
            posting_url,
            title: FETCH_FAILED.to_owned(),
            company: FETCH_FAILED.to_owned(),
            description: FETCH_FAILED.to_owned(),
            compensation_note: PAGE_INACCESSIBLE.to_owned(),
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        self.title == FETCH_FAILED
            && self.company == FETCH_FAILED
            && self.description == FETCH_FAILED
            && self.compensation_note == PAGE_INACCESSIBLE
    }

    pub fn posting_url(&self) -> &PostingLink {
        &self.posting_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn compensation_note(&self) -> &str {
        &self.compensation_note
    }
}

fn default_max_results() -> usize {
    10
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub job_titles: Vec<String>,
    pub location: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl SearchConfig {
    pub fn new(job_titles: Vec<String>, location: String) -> Self {
        Self {
            job_titles,
            location,
            max_results: default_max_results(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::InvalidConfig(
                "max_results must be a positive number".to_owned(),
            ));
        }
        if self.job_titles.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::InvalidConfig(
                "job titles must not be blank".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn link() -> PostingLink {
        PostingLink::parse("https://www.linkedin.com/jobs/view/123").unwrap()
    }

    #[test]
    fn test_posting_link_requires_scheme_and_host() {
        assert!(PostingLink::parse("/jobs/view/123").is_err());
        assert!(PostingLink::parse("mailto:someone@example.com").is_err());
        assert!(matches!(
            PostingLink::parse("not a url"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_resolve_relative_reference() {
        let base = Url::parse("https://www.linkedin.com").unwrap();
        let link = PostingLink::resolve(&base, "/jobs/view/42?trk=abc").unwrap();
        assert_eq!(link.as_str(), "https://www.linkedin.com/jobs/view/42?trk=abc");
    }

    #[test]
    fn test_missing_fields_fall_back_to_sentinels() {
        let record = JobRecord::new(link(), None, Some("  ".to_owned()), None, None);
        assert_eq!(record.title(), NO_TITLE);
        assert_eq!(record.company(), NO_COMPANY);
        assert_eq!(record.description(), NO_DESCRIPTION);
        assert_eq!(record.compensation_note(), NO_COMPENSATION);
        assert!(!record.is_fetch_failure());
    }

    #[test]
    fn test_fetch_failed_record() {
        let record = JobRecord::fetch_failed(link());
        assert_eq!(record.title(), FETCH_FAILED);
        assert_eq!(record.company(), FETCH_FAILED);
        assert_eq!(record.description(), FETCH_FAILED);
        assert_eq!(record.compensation_note(), PAGE_INACCESSIBLE);
        assert!(record.is_fetch_failure());
    }

    #[test]
    fn test_record_serializes_fields_in_order() {
        let record = JobRecord::new(
            link(),
            Some("Data Scientist".to_owned()),
            Some("Acme".to_owned()),
            Some("Build models".to_owned()),
            Some("$120,000".to_owned()),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"posting_url":"https://www.linkedin.com/jobs/view/123","title":"Data Scientist","company":"Acme","description":"Build models","compensation_note":"$120,000"}"#
        );
    }

    #[test]
    fn test_search_config_defaults_and_validation() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"job_titles":["Rust"],"location":"Berlin"}"#).unwrap();
        assert_eq!(config.max_results, 10);
        assert!(config.validate().is_ok());
        assert!(config.clone().with_max_results(0).validate().is_err());
    }
}
