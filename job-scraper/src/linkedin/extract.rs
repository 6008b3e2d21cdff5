use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use super::SITE_BRAND;
use crate::types::{JobRecord, PostingLink};

const DESCRIPTION_KEYWORDS: [&str; 8] = [
    "responsibilities",
    "requirements",
    "experience",
    "skills",
    "qualifications",
    "position",
    "role",
    "duties",
];
const MIN_DESCRIPTION_LEN: usize = 300;

/// Boilerplate that trails the company name in the top card, cut in this order
const COMPANY_NOISE: [&str; 3] = ["Charlotte, NC", " ago", " applicants"];

/// One step of an ordered fallback chain: where to look, whether the found text is usable,
/// and how to clean it up.
struct Rule {
    locator: Selector,
    accept: fn(&str) -> bool,
    transform: fn(&str) -> String,
}

impl Rule {
    fn new(locator: &str, accept: fn(&str) -> bool, transform: fn(&str) -> String) -> Self {
        Self {
            locator: Selector::parse(locator).expect("locator should be a valid css selector"),
            accept,
            transform,
        }
    }

    /// The cleaned text of the first located element, if it is accepted.
    fn apply(&self, doc: &Html) -> Option<String> {
        let text = element_text(doc.select(&self.locator).next()?);
        (self.accept)(&text).then(|| (self.transform)(&text))
    }
}

/// The first accepted candidate ends the chain, even if cleaning leaves nothing of it.
fn first_accepted(rules: &[Rule], doc: &Html) -> Option<String> {
    rules
        .iter()
        .find_map(|rule| rule.apply(doc))
        .filter(|value| !value.is_empty())
}

/// Like [`first_accepted`], but candidates that clean to nothing let the chain go on.
fn first_non_empty(rules: &[Rule], doc: &Html) -> Option<String> {
    rules
        .iter()
        .filter_map(|rule| rule.apply(doc))
        .find(|value| !value.is_empty())
}

lazy_static! {
    static ref TITLE_RULES: Vec<Rule> = [
        "h1",
        ".top-card-layout__title",
        ".job-details-jobs-unified-top-card__job-title",
        "title",
    ]
    .into_iter()
    .map(|locator| Rule::new(locator, accept_title, clean_title))
    .collect();
    static ref COMPANY_RULES: Vec<Rule> = [
        ".job-details-jobs-unified-top-card__company-name",
        ".jobs-unified-top-card__company-name",
        ".top-card-layout__second-subline",
        ".job-details-jobs-unified-top-card__primary-description-container a",
        r#"a[data-tracking-control-name="job_details_topcard_company_url"]"#,
    ]
    .into_iter()
    .map(|locator| Rule::new(locator, accept_company, clean_company))
    .collect();
    static ref DESCRIPTION_RULES: Vec<Rule> = [
        ".show-more-less-html__markup",
        ".jobs-description__content",
        ".job-description",
    ]
    .into_iter()
    .map(|locator| Rule::new(locator, |text| !text.is_empty(), str::to_owned))
    .collect();
    static ref BLOCKS: Selector = Selector::parse("div, section").expect("valid selector");
}

/// Text of an element with every fragment trimmed and joined by single spaces.
fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn mentions_brand(text: &str) -> bool {
    text.to_lowercase().contains(SITE_BRAND)
}

fn accept_title(text: &str) -> bool {
    text.chars().count() > 5 && !mentions_brand(text)
}

/// Everything after the first `|` or `-` is site branding or location.
fn clean_title(text: &str) -> String {
    text.split(['|', '-']).next().unwrap_or_default().trim().to_owned()
}

fn accept_company(text: &str) -> bool {
    text.chars().count() > 1 && !mentions_brand(text)
}

fn clean_company(text: &str) -> String {
    COMPANY_NOISE
        .iter()
        .fold(text, |acc, noise| acc.split_once(noise).map_or(acc, |(head, _)| head))
        .trim()
        .to_owned()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Posting slugs look like `senior-engineer-at-acme-corp-3912345678`,
/// the company sits between `-at-` and the numeric posting id.
fn company_from_url(link: &PostingLink) -> Option<String> {
    let (_, tail) = link.url().path().split_once("-at-")?;
    let slug = tail.split('/').next()?;
    let words = slug.split('-').filter(|w| !w.is_empty()).collect::<Vec<_>>();
    let end = words
        .iter()
        .rposition(|w| !w.chars().all(|c| c.is_ascii_digit()))?;
    let name = words[..=end]
        .iter()
        .map(|w| title_case(w))
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

fn extract_title(doc: &Html) -> Option<String> {
    first_accepted(&TITLE_RULES, doc)
}

fn extract_company(doc: &Html, link: &PostingLink) -> Option<String> {
    first_non_empty(&COMPANY_RULES, doc).or_else(|| company_from_url(link))
}

fn extract_description(doc: &Html) -> Option<String> {
    first_non_empty(&DESCRIPTION_RULES, doc).or_else(|| {
        doc.select(&BLOCKS).map(element_text).find(|text| {
            let lower = text.to_lowercase();
            text.chars().count() > MIN_DESCRIPTION_LEN
                && DESCRIPTION_KEYWORDS.iter().any(|k| lower.contains(k))
        })
    })
}

/// Tokens come from the page text as a whole, adjacent text nodes run together.
fn extract_compensation(doc: &Html) -> Option<String> {
    let text = doc.root_element().text().collect::<String>();
    text.split_whitespace()
        .find(|token| token.contains('$') && token.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_owned)
}

/// Builds a record out of a posting page, fields that can't be found end up as sentinels.
pub fn extract(doc: &Html, link: &PostingLink) -> JobRecord {
    let title = extract_title(doc);
    let company = extract_company(doc, link);
    let description = extract_description(doc);
    let compensation = extract_compensation(doc);
    log::debug!(
        "Extracted {}: title: {:?}, company: {:?}, compensation: {:?}",
        link,
        title,
        company,
        compensation
    );
    JobRecord::new(link.clone(), title, company, description, compensation)
}
