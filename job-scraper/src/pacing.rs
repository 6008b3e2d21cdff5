use std::ops::RangeInclusive;
use std::time::Duration;

use async_trait::async_trait;

/// The points of a scrape at which the scraper yields to the pacing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    BetweenSearches,
    BetweenPostings,
}

#[async_trait]
pub trait Pacer {
    async fn pause(&self, pause: Pause);
}

/// Sleeps for a uniformly random number of seconds picked from the range configured for the pause.
#[derive(Debug, Clone)]
pub struct RandomPacer {
    between_searches: RangeInclusive<f64>,
    between_postings: RangeInclusive<f64>,
}

impl Default for RandomPacer {
    fn default() -> Self {
        Self {
            between_searches: 1.0..=2.0,
            between_postings: 1.0..=3.0,
        }
    }
}

impl RandomPacer {
    pub fn new(between_searches: RangeInclusive<f64>, between_postings: RangeInclusive<f64>) -> Self {
        Self {
            between_searches,
            between_postings,
        }
    }

    fn delay(&self, pause: Pause) -> Duration {
        let range = match pause {
            Pause::BetweenSearches => &self.between_searches,
            Pause::BetweenPostings => &self.between_postings,
        };
        let (min, max) = (range.start().max(0.0), range.end().max(0.0));
        if max <= min {
            return Duration::from_secs_f64(min);
        }
        Duration::from_secs_f64(rand::random_range(min..=max))
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn pause(&self, pause: Pause) {
        let delay = self.delay(pause);
        log::debug!("{:?}: sleeping for {:?}", pause, delay);
        tokio::time::sleep(delay).await;
    }
}

/// Never waits, used for tests and for `--no-delay` runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self, _pause: Pause) {}
}
