use std::collections::HashSet;

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

use crate::types::PostingLink;

const POSTING_PATH_MARKER: &str = "/jobs/view/";

lazy_static! {
    static ref ANCHORS: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// Collects the unique posting links of a search results page in the order they appear.
/// Host-relative references are resolved against `base`.
pub fn harvest_links(doc: &Html, base: &Url) -> Vec<PostingLink> {
    let mut seen = HashSet::new();
    doc.select(&ANCHORS)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| href.contains(POSTING_PATH_MARKER))
        .filter_map(|href| match PostingLink::resolve(base, href) {
            Ok(link) => Some(link),
            Err(e) => {
                log::warn!("Skipping posting reference: {}", e);
                None
            }
        })
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Appends the links of `batch` that are not yet part of `links`, keeping first-seen order.
pub(crate) fn merge_links(links: &mut Vec<PostingLink>, batch: Vec<PostingLink>) -> usize {
    let mut seen = links.iter().cloned().collect::<HashSet<_>>();
    let before = links.len();
    links.extend(batch.into_iter().filter(|link| seen.insert(link.clone())));
    links.len() - before
}
