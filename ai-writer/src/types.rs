use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Failed to read document archive: '{0}'")]
    Archive(#[from] zip::result::ZipError),
    #[error("Malformed document xml: '{0}'")]
    Xml(#[from] quick_xml::Error),
    #[error("Unsupported document '{0}', expected a .docx file")]
    UnsupportedDocument(PathBuf),
}
