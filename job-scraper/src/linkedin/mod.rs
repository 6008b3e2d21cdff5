mod extract;
mod links;

pub use extract::extract;
pub use links::harvest_links;

use lazy_static::lazy_static;
use url::Url;

use crate::fetch::Fetcher;
use crate::pacing::{Pacer, Pause};
use crate::types::{JobRecord, PostingLink, SearchConfig};

pub const BASE_URL: &str = "https://www.linkedin.com";

/// Lower-cased brand name, text containing it is site chrome rather than posting content
pub(crate) const SITE_BRAND: &str = "linkedin";

lazy_static! {
    static ref BASE: Url = Url::parse(BASE_URL).expect("valid base url");
}

fn job_search_url(query: &str, location: &str) -> String {
    format!(
        "{}/jobs/search?keywords={}&location={}",
        BASE_URL,
        urlencoding::encode(query),
        urlencoding::encode(location)
    )
}

/// Runs job searches and turns every discovered posting into a [`JobRecord`].
/// Requests are made one at a time, the pacer decides how long to wait in between.
pub struct Scraper<F, P> {
    fetcher: F,
    pacer: P,
}

impl<F: Fetcher, P: Pacer> Scraper<F, P> {
    pub fn new(fetcher: F, pacer: P) -> Self {
        Self { fetcher, pacer }
    }

    /// Searches every configured job title and returns the unique posting links,
    /// capped at `max_results`.
    pub async fn collect_links(&self, config: &SearchConfig) -> Vec<PostingLink> {
        let mut links = Vec::new();
        for (i, title) in config.job_titles.iter().enumerate() {
            if i > 0 {
                self.pacer.pause(Pause::BetweenSearches).await;
            }
            log::info!("Searching for: {} in {}", title, config.location);
            let url = job_search_url(title, &config.location);
            let batch = match self.fetcher.fetch(&url).await {
                Ok(doc) => harvest_links(&doc, &BASE),
                Err(e) => {
                    log::error!("Search for '{}' failed, skipping: {}", title, e);
                    continue;
                }
            };
            let found = batch.len();
            let added = links::merge_links(&mut links, batch);
            log::info!("Found {} posting links for '{}', {} new", found, title, added);
        }
        links.truncate(config.max_results);
        links
    }

    /// Fetches a single posting, a failed fetch yields a placeholder record instead of an error.
    pub async fn scrape_posting(&self, link: &PostingLink) -> JobRecord {
        log::info!("Extracting: {}", link);
        match self.fetcher.fetch(link.as_str()).await {
            Ok(doc) => extract(&doc, link),
            Err(e) => {
                log::error!("Failed to fetch posting {}: {}", link, e);
                JobRecord::fetch_failed(link.clone())
            }
        }
    }

    pub async fn run(&self, config: &SearchConfig) -> Vec<JobRecord> {
        log::info!(
            "Searching for {} job titles in {}: {}",
            config.job_titles.len(),
            config.location,
            config.job_titles.join(", ")
        );
        let links = self.collect_links(config).await;
        log::info!("Found {} job links", links.len());

        let mut records = Vec::with_capacity(links.len());
        for (i, link) in links.iter().enumerate() {
            log::info!("Processing job {}/{}", i + 1, links.len());
            records.push(self.scrape_posting(link).await);
            if i + 1 < links.len() {
                self.pacer.pause(Pause::BetweenPostings).await;
            }
        }
        records
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use scraper::Html;

    use super::*;
    use crate::types::{Error, Result, FETCH_FAILED, PAGE_INACCESSIBLE};

    /// Serves canned pages, every other url fails.
    #[derive(Default)]
    struct StaticFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_owned(), body.to_owned());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<Html> {
            self.requests.lock().unwrap().push(url.to_owned());
            self.pages
                .get(url)
                .map(|body| Html::parse_document(body))
                .ok_or_else(|| Error::PageUnavailable(url.to_owned()))
        }
    }

    #[derive(Default)]
    struct RecordingPacer {
        pauses: Mutex<Vec<Pause>>,
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pause(&self, pause: Pause) {
            self.pauses.lock().unwrap().push(pause);
        }
    }

    fn posting(id: u32) -> String {
        format!("{}/jobs/view/{}", BASE_URL, id)
    }

    fn search_page(ids: &[u32]) -> String {
        ids.iter()
            .map(|id| format!(r#"<a href="/jobs/view/{}">job {}</a>"#, id, id))
            .collect()
    }

    fn config(titles: &[&str], max_results: usize) -> SearchConfig {
        SearchConfig::new(
            titles.iter().map(|t| t.to_string()).collect(),
            "Charlotte, NC".to_owned(),
        )
        .with_max_results(max_results)
    }

    #[test]
    fn test_job_search_url_is_encoded() {
        assert_eq!(
            job_search_url("Data Scientist", "Charlotte, NC"),
            "https://www.linkedin.com/jobs/search?keywords=Data%20Scientist&location=Charlotte%2C%20NC"
        );
    }

    #[tokio::test]
    async fn test_empty_title_list() {
        let scraper = Scraper::new(StaticFetcher::default(), RecordingPacer::default());
        let records = scraper.run(&config(&[], 10)).await;
        assert!(records.is_empty());
        assert!(scraper.fetcher.requests().is_empty());
        assert!(scraper.pacer.pauses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_links_are_merged_across_titles_and_capped() {
        let fetcher = StaticFetcher::default()
            .page(&job_search_url("Rust", "Charlotte, NC"), &search_page(&[1, 2, 3]))
            .page(&job_search_url("Go", "Charlotte, NC"), &search_page(&[3, 4, 1, 5]));
        let scraper = Scraper::new(fetcher, RecordingPacer::default());

        let links = scraper.collect_links(&config(&["Rust", "Go"], 4)).await;
        let links = links.into_iter().map(String::from).collect::<Vec<_>>();
        assert_eq!(links, vec![posting(1), posting(2), posting(3), posting(4)]);

        let links = scraper.collect_links(&config(&["Rust", "Go"], 100)).await;
        assert_eq!(links.len(), 5);
    }

    #[tokio::test]
    async fn test_failed_search_is_skipped() {
        let fetcher = StaticFetcher::default()
            .page(&job_search_url("Go", "Charlotte, NC"), &search_page(&[7]));
        let scraper = Scraper::new(fetcher, RecordingPacer::default());
        let links = scraper.collect_links(&config(&["Rust", "Go"], 10)).await;
        assert_eq!(links.len(), 1);
        assert_eq!(
            *scraper.pacer.pauses.lock().unwrap(),
            vec![Pause::BetweenSearches]
        );
    }

    #[tokio::test]
    async fn test_run_extracts_postings_in_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        let fetcher = StaticFetcher::default()
            .page(&job_search_url("Rust", "Charlotte, NC"), &search_page(&[1, 2, 3]))
            .page(
                &posting(1),
                r#"<h1>Rust Engineer | Acme</h1>
                <div class="top-card-layout__second-subline">Acme Corp Charlotte, NC · 1 day ago</div>
                <div class="show-more-less-html__markup">Write Rust. Pay: $150,000/yr</div>"#,
            )
            .page(&posting(3), "<h1>Systems Programmer</h1>");
        let scraper = Scraper::new(fetcher, RecordingPacer::default());

        let records = scraper.run(&config(&["Rust"], 10)).await;
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].posting_url().as_str(), posting(1));
        assert_eq!(records[0].title(), "Rust Engineer");
        assert_eq!(records[0].company(), "Acme Corp");
        assert_eq!(records[0].description(), "Write Rust. Pay: $150,000/yr");
        assert_eq!(records[0].compensation_note(), "$150,000/yr");

        assert!(records[1].is_fetch_failure());
        assert_eq!(records[1].title(), FETCH_FAILED);
        assert_eq!(records[1].compensation_note(), PAGE_INACCESSIBLE);

        assert_eq!(records[2].title(), "Systems Programmer");

        assert_eq!(
            *scraper.pacer.pauses.lock().unwrap(),
            vec![Pause::BetweenPostings, Pause::BetweenPostings]
        );
        assert_eq!(
            scraper.fetcher.requests()[1..],
            [posting(1), posting(2), posting(3)]
        );
    }
}
