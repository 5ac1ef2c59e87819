//! In-memory content source backed by exported CMS documents

use serde::Deserialize;
use std::cmp::{Ordering, Reverse};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentSource, SourceError};
use crate::content::{RawDocument, RawPageResult, Timestamp};
use crate::feed::Cursor;

/// A JSON export holds either one document or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Many(Vec<RawDocument>),
    One(Box<RawDocument>),
}

/// Content source holding every document in memory
///
/// Documents are kept in descending `(date, uid)` order, the reverse of the
/// order navigation walks; undated documents sort last.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<RawDocument>,
}

impl MemorySource {
    pub fn new(mut documents: Vec<RawDocument>) -> Self {
        documents.sort_by_cached_key(|doc| Reverse((publication_date(doc), doc.uid.clone())));
        Self { documents }
    }

    /// Load every `*.json` export under `dir` whose type matches `document_type`
    pub fn load_dir(dir: &Path, document_type: &str) -> Result<Self, SourceError> {
        if !dir.is_dir() {
            return Err(SourceError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("content directory {:?} does not exist", dir),
            )));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_json_file(path) {
                continue;
            }

            match read_documents(path) {
                Ok(docs) => {
                    tracing::debug!("Loaded {} document(s) from {:?}", docs.len(), path);
                    documents.extend(docs.into_iter().filter(|doc| {
                        doc.doc_type
                            .as_deref()
                            .map_or(true, |t| t == document_type)
                    }));
                }
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }

        tracing::info!("Loaded {} documents from {:?}", documents.len(), dir);
        Ok(Self::new(documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn page(&self, page: usize, page_size: usize) -> RawPageResult {
        let start = (page - 1).saturating_mul(page_size);
        let results: Vec<RawDocument> = self
            .documents
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        let next_page = if start.saturating_add(page_size) < self.documents.len() {
            Some(format_cursor(page + 1, page_size))
        } else {
            None
        };

        RawPageResult { results, next_page }
    }

    fn dated(&self) -> impl Iterator<Item = (Timestamp, &RawDocument)> {
        self.documents
            .iter()
            .filter_map(|doc| publication_date(doc).map(|ts| (ts, doc)))
    }
}

impl ContentSource for MemorySource {
    fn fetch_first_page(&self, page_size: usize) -> Result<RawPageResult, SourceError> {
        if page_size == 0 {
            return Err(SourceError::InvalidPageSize);
        }
        Ok(self.page(1, page_size))
    }

    fn fetch_page(&self, cursor: &Cursor) -> Result<RawPageResult, SourceError> {
        let (page, page_size) = parse_cursor(cursor)?;
        Ok(self.page(page, page_size))
    }

    fn query_before_date(&self, date: &Timestamp) -> Result<Option<RawDocument>, SourceError> {
        Ok(self
            .dated()
            .filter(|(ts, _)| ts < date)
            .max_by(by_date_then_uid)
            .map(|(_, doc)| doc.clone()))
    }

    fn query_after_date(&self, date: &Timestamp) -> Result<Option<RawDocument>, SourceError> {
        Ok(self
            .dated()
            .filter(|(ts, _)| ts > date)
            .min_by(by_date_then_uid)
            .map(|(_, doc)| doc.clone()))
    }

    fn get_by_uid(&self, uid: &str) -> Result<RawDocument, SourceError> {
        self.documents
            .iter()
            .find(|doc| doc.uid.as_deref() == Some(uid))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(uid.to_string()))
    }
}

fn by_date_then_uid(a: &(Timestamp, &RawDocument), b: &(Timestamp, &RawDocument)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.uid.cmp(&b.1.uid))
}

fn publication_date(doc: &RawDocument) -> Option<Timestamp> {
    doc.first_publication_date
        .as_deref()
        .and_then(|raw| Timestamp::parse(raw).ok())
}

fn format_cursor(page: usize, page_size: usize) -> String {
    format!("page={}&pageSize={}", page, page_size)
}

fn parse_cursor(cursor: &Cursor) -> Result<(usize, usize), SourceError> {
    let mut page = None;
    let mut page_size = None;

    for pair in cursor.as_str().split('&') {
        match pair.split_once('=') {
            Some(("page", value)) => page = value.parse::<usize>().ok(),
            Some(("pageSize", value)) => page_size = value.parse::<usize>().ok(),
            _ => {}
        }
    }

    match (page, page_size) {
        (Some(page), Some(size)) if page >= 1 && size >= 1 => Ok((page, size)),
        _ => Err(SourceError::InvalidCursor(cursor.to_string())),
    }
}

fn read_documents(path: &Path) -> Result<Vec<RawDocument>, SourceError> {
    let content = fs::read_to_string(path)?;
    let file: DocumentFile =
        serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match file {
        DocumentFile::Many(docs) => docs,
        DocumentFile::One(doc) => vec![*doc],
    })
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
