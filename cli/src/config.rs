use std::path::Path;

use anyhow::{Context, Result};
use job_scraper::SearchConfig;
use serde::Deserialize;

/// Layout of the yaml configuration file
#[derive(Deserialize, Debug)]
pub struct Config {
    pub job_search: SearchConfig,
}

impl Config {
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).context("Invalid configuration")?;
        config.job_search.validate()?;
        if config.job_search.job_titles.is_empty() {
            log::warn!("No job titles configured, nothing will be searched");
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&yaml)
    }
}
