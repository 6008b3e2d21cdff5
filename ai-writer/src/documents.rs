use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::api::DocumentLoader;
use crate::types::{Error, Result};

const DOCUMENT_XML: &str = "word/document.xml";

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(extension))
}

/// Text of the paragraphs in a WordprocessingML body, each one followed by a line break.
///
/// A paragraph only collects the text of its own runs. Paragraphs nested inside it, such as
/// text box content, become lines of their own right after it.
fn paragraphs_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    // slots of the paragraphs currently open, innermost last
    let mut open: Vec<usize> = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"w:p" {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                path.push(e.name().as_ref().to_vec());
            }
            Event::End(e) => {
                if e.name().as_ref() == b"w:p" {
                    open.pop();
                }
                path.pop();
            }
            Event::Empty(e) => {
                let in_run = path.last().map_or(false, |p| p == b"w:r");
                match (e.name().as_ref(), open.last()) {
                    (b"w:p", _) => paragraphs.push(String::new()),
                    (b"w:tab", Some(&slot)) if in_run => paragraphs[slot].push('\t'),
                    (b"w:br" | b"w:cr", Some(&slot)) if in_run => paragraphs[slot].push('\n'),
                    _ => {}
                }
            }
            Event::Text(t) => {
                let in_text = path.last().map_or(false, |p| p == b"w:t");
                if let (true, Some(&slot)) = (in_text, open.last()) {
                    paragraphs[slot].push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    let mut text = String::new();
    for paragraph in paragraphs {
        text.push_str(&paragraph);
        text.push('\n');
    }
    Ok(text)
}

/// Loads the paragraph text of Word `.docx` documents
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxLoader;

impl DocumentLoader for DocxLoader {
    fn load_text(&self, path: &Path) -> Result<String> {
        if !has_extension(path, "docx") {
            return Err(Error::UnsupportedDocument(path.to_owned()));
        }
        log::debug!("Reading document {}", path.display());
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let mut xml = String::new();
        archive.by_name(DOCUMENT_XML)?.read_to_string(&mut xml)?;
        paragraphs_text(&xml)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextLoader;

impl DocumentLoader for PlainTextLoader {
    fn load_text(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Picks the docx loader for `.docx` files and reads anything else as plain text
#[derive(Debug, Default, Clone, Copy)]
pub struct AnyDocumentLoader;

impl DocumentLoader for AnyDocumentLoader {
    fn load_text(&self, path: &Path) -> Result<String> {
        if has_extension(path, "docx") {
            DocxLoader.load_text(path)
        } else {
            PlainTextLoader.load_text(path)
        }
    }
}
