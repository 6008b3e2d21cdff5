use std::path::Path;

use anyhow::{Context, Result};
use job_scraper::{HttpFetcher, NoPacing, Pacer, RandomPacer, Scraper, SearchConfig};

async fn run<P: Pacer>(config: &SearchConfig, pacer: P, output: &Path) -> Result<()> {
    let fetcher = HttpFetcher::new().context("Failed to build http client")?;
    let records = Scraper::new(fetcher, pacer).run(config).await;
    if records.is_empty() {
        log::warn!("No jobs found");
    }
    for (i, record) in records.iter().enumerate() {
        log::info!(
            "{}. {} at {} ({}), compensation: {}",
            i + 1,
            record.title(),
            record.company(),
            record.posting_url(),
            record.compensation_note()
        );
    }
    persistence::save_records(output, &records)
        .await
        .with_context(|| format!("Failed to save jobs to {}", output.display()))
}

pub async fn scrape(config: &SearchConfig, output: &Path, no_delay: bool) -> Result<()> {
    if no_delay {
        run(config, NoPacing, output).await
    } else {
        run(config, RandomPacer::default(), output).await
    }
}
