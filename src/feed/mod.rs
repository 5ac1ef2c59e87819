//! Paginated post feed
//!
//! A [`Feed`] is an immutable value: the accumulated summaries plus the cursor
//! of the next page. Appending a page produces a new feed, so a listing grows
//! by replacing its feed value rather than by mutating shared state.
//!
//! Pages must be appended in the order they were fetched. The cursor of page
//! N is needed to fetch page N+1, so callers fetch and append sequentially.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::{project_all, PostSummary, RawPageResult};
use crate::source::{ContentSource, SourceError};

/// Opaque "where to resume" token, meaningful only to the content source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accumulated post summaries and the cursor to the next page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    items: Vec<PostSummary>,
    next_cursor: Option<Cursor>,
}

impl Feed {
    /// A feed with no items and no further pages
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the initial feed from the first fetched page
    ///
    /// Items keep source order; documents that fail projection are skipped.
    pub fn seed(page: &RawPageResult) -> Self {
        Self {
            items: project_all(&page.results),
            next_cursor: next_cursor(page),
        }
    }

    /// A new feed with `page`'s items after the current ones
    ///
    /// No de-duplication happens here: cursors are trusted to address
    /// disjoint pages, so a uid returned twice appears twice.
    pub fn append(&self, page: &RawPageResult) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + page.results.len());
        items.extend_from_slice(&self.items);
        items.extend(project_all(&page.results));

        Self {
            items,
            next_cursor: next_cursor(page),
        }
    }

    /// Whether the source reported a further page
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn items(&self) -> &[PostSummary] {
        &self.items
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fetch the first page from `source` and seed a feed with it
    pub fn fetch_first<S: ContentSource + ?Sized>(
        source: &S,
        page_size: usize,
    ) -> Result<Self, SourceError> {
        let page = source.fetch_first_page(page_size)?;
        Ok(Self::seed(&page))
    }

    /// Fetch the next page and append it
    ///
    /// Returns `Ok(None)` once the feed has no further pages.
    pub fn load_more<S: ContentSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Option<Self>, SourceError> {
        let Some(cursor) = self.next_cursor.as_ref() else {
            return Ok(None);
        };

        tracing::debug!("Loading more posts from cursor {}", cursor);
        let page = source.fetch_page(cursor)?;
        Ok(Some(self.append(&page)))
    }
}

fn next_cursor(page: &RawPageResult) -> Option<Cursor> {
    page.next_token().map(Cursor::new)
}
