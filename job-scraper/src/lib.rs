pub mod fetch;
pub mod linkedin;
pub mod pacing;
pub mod types;

pub use fetch::{Fetcher, HttpFetcher};
pub use linkedin::Scraper;
pub use pacing::{NoPacing, Pacer, Pause, RandomPacer};
pub use types::{Error, JobRecord, PostingLink, Result, SearchConfig};
