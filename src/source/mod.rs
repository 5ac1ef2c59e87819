//! Content source capability
//!
//! Everything the core needs from the CMS goes through [`ContentSource`], which
//! is passed explicitly to the operations that need it. There is no global
//! client.

mod memory;

pub use memory::MemorySource;

use std::path::PathBuf;
use thiserror::Error;

use crate::content::{RawDocument, RawPageResult, Timestamp};
use crate::feed::Cursor;

/// Errors reported by a content source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no such post: {0}")]
    NotFound(String),

    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Queries the core issues against the content provider
pub trait ContentSource: Send + Sync {
    /// First page of posts, newest first
    fn fetch_first_page(&self, page_size: usize) -> Result<RawPageResult, SourceError>;

    /// The page a cursor points at
    fn fetch_page(&self, cursor: &Cursor) -> Result<RawPageResult, SourceError>;

    /// The single post published immediately before `date`, if any
    fn query_before_date(&self, date: &Timestamp) -> Result<Option<RawDocument>, SourceError>;

    /// The single post published immediately after `date`, if any
    fn query_after_date(&self, date: &Timestamp) -> Result<Option<RawDocument>, SourceError>;

    /// Look a post up by uid; fails with [`SourceError::NotFound`]
    fn get_by_uid(&self, uid: &str) -> Result<RawDocument, SourceError>;
}
