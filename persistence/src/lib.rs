use std::path::Path;

use ai_writer::CustomizedApplication;
use job_scraper::{JobRecord, PostingLink};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const RECORDS_FILE: &str = "job_results.json";
pub const APPLICATIONS_FILE: &str = "customized_applications.json";

#[derive(Debug, Error)]
pub enum Error {
    #[error("File IO operation failed, error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Invalid json: '{0}'")]
    Json(#[from] serde_json::Error),
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("Invalid posting url '{url}' at index {index}: {reason}")]
    InvalidUrl {
        index: usize,
        url: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

async fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Writes the records as an indented json array, one object per record.
pub async fn save_records(path: &Path, records: &[JobRecord]) -> Result<()> {
    write_pretty(path, records).await?;
    log::info!("Saved {} jobs to {}", records.len(), path.display());
    Ok(())
}

pub async fn save_applications(path: &Path, applications: &[CustomizedApplication]) -> Result<()> {
    write_pretty(path, applications).await?;
    log::info!("Saved {} applications to {}", applications.len(), path.display());
    Ok(())
}

fn malformed(index: usize, reason: impl Into<String>) -> Error {
    Error::MalformedRecord {
        index,
        reason: reason.into(),
    }
}

fn required_field<'a>(index: usize, object: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    match object.get(field) {
        None => Err(malformed(index, format!("missing field '{}'", field))),
        Some(Value::String(value)) if value.trim().is_empty() => {
            Err(malformed(index, format!("field '{}' is empty", field)))
        }
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(malformed(
            index,
            format!("field '{}' must be a string, found {}", field, other),
        )),
    }
}

fn parse_link(index: usize, raw: &str) -> Result<PostingLink> {
    PostingLink::parse(raw).map_err(|e| match e {
        job_scraper::Error::InvalidUrl { url, reason } => Error::InvalidUrl { index, url, reason },
        other => malformed(index, other.to_string()),
    })
}

fn parse_record(index: usize, value: &Value) -> Result<JobRecord> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed(index, "expected a json object"))?;
    let field = |name: &str| required_field(index, object, name);
    let posting_url = field("posting_url")?;
    let title = field("title")?;
    let company = field("company")?;
    let description = field("description")?;
    let compensation_note = field("compensation_note")?;
    Ok(JobRecord::new(
        parse_link(index, posting_url)?,
        Some(title.to_owned()),
        Some(company.to_owned()),
        Some(description.to_owned()),
        Some(compensation_note.to_owned()),
    ))
}

/// Parses records written by [`save_records`], every element is checked against the record schema.
pub fn parse_records(json: &str) -> Result<Vec<JobRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let elements = match value {
        Value::Array(elements) => elements,
        _ => return Err(malformed(0, "expected a json array of records")),
    };
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| parse_record(index, element))
        .collect()
}

pub async fn load_records(path: &Path) -> Result<Vec<JobRecord>> {
    let json = tokio::fs::read_to_string(path).await?;
    let records = parse_records(&json)?;
    log::info!("Loaded {} jobs from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod test {
    use super::*;

    const RECORD_FIELDS: [&str; 5] = [
        "posting_url",
        "title",
        "company",
        "description",
        "compensation_note",
    ];

    fn record(id: u32, title: &str) -> JobRecord {
        JobRecord::new(
            PostingLink::parse(&format!("https://www.linkedin.com/jobs/view/{}", id)).unwrap(),
            Some(title.to_owned()),
            Some("Société Générale".to_owned()),
            Some("Analyse des données, équipe de 5".to_owned()),
            None,
        )
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RECORDS_FILE);
        let records = vec![
            record(1, "Data Scientist"),
            JobRecord::fetch_failed(PostingLink::parse("https://www.linkedin.com/jobs/view/2").unwrap()),
            record(1, "Data Scientist"),
        ];
        save_records(&path, &records).await.unwrap();
        let loaded = load_records(&path).await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_saved_json_is_indented_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RECORDS_FILE);
        save_records(&path, &[record(7, "Ingénieur")]).await.unwrap();
        let json = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(json.starts_with("[\n  {\n    \"posting_url\": \"https://www.linkedin.com/jobs/view/7\",\n    \"title\": \"Ingénieur\","));
        assert!(json.contains("Société Générale"));
        let fields = RECORD_FIELDS
            .iter()
            .map(|f| json.find(&format!("\"{}\"", f)).unwrap())
            .collect::<Vec<_>>();
        assert!(fields.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_collection() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"[
            {"posting_url": "https://x.test/jobs/view/1", "title": "a", "company": "b", "description": "c", "compensation_note": "d"},
            {"posting_url": "https://x.test/jobs/view/2", "title": "a", "company": "b", "description": "c"}
        ]"#;
        match parse_records(json) {
            Err(Error::MalformedRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("compensation_note"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let json = r#"[{"posting_url": "https://x.test/jobs/view/1", "title": 42, "company": "b", "description": "c", "compensation_note": "d"}]"#;
        assert!(matches!(
            parse_records(json),
            Err(Error::MalformedRecord { index: 0, .. })
        ));
        assert!(matches!(
            parse_records(r#"{"records": []}"#),
            Err(Error::MalformedRecord { .. })
        ));
        assert!(matches!(parse_records(r#"["job"]"#), Err(Error::MalformedRecord { .. })));
        assert!(matches!(parse_records("[{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let json = r#"[
            {"posting_url": "https://x.test/jobs/view/1", "title": "a", "company": "b", "description": "c", "compensation_note": "d"},
            {"posting_url": "/jobs/view/2", "title": "a", "company": "b", "description": "c", "compensation_note": "d"}
        ]"#;
        match parse_records(json) {
            Err(Error::InvalidUrl { index, url, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(url, "/jobs/view/2");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let json = r#"[{"posting_url": "https://x.test/jobs/view/1", "title": "  ", "company": "b", "description": "c", "compensation_note": "d"}]"#;
        match parse_records(json) {
            Err(Error::MalformedRecord { index, reason }) => {
                assert_eq!(index, 0);
                assert!(reason.contains("title"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_save_applications() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APPLICATIONS_FILE);
        let application = CustomizedApplication::new(
            &record(3, "Analyst"),
            "resume".to_owned(),
            "letter".to_owned(),
        );
        save_applications(&path, &[application]).await.unwrap();
        let json = tokio::fs::read_to_string(&path).await.unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["posting_url"], "https://www.linkedin.com/jobs/view/3");
        assert_eq!(value[0]["customized_resume"], "resume");
        assert_eq!(value[0]["customized_cover_letter"], "letter");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_records(&dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
