//! Previous/next post navigation
//!
//! Neighbours are found with two single-item date queries against the content
//! source rather than by scanning the whole corpus.

use serde::{Deserialize, Serialize};

use crate::content::{project, PostSummary, RawDocument, Timestamp};
use crate::source::{ContentSource, SourceError};

/// The chronologically adjacent posts of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyResult {
    /// Latest post published strictly before the target
    pub previous: Option<PostSummary>,

    /// Earliest post published strictly after the target
    pub next: Option<PostSummary>,
}

/// Resolve the posts published immediately before and after `target`
///
/// A missing neighbour is not an error: the oldest post has no previous post
/// and the newest has no next one.
pub fn resolve<S: ContentSource + ?Sized>(
    target: &Timestamp,
    source: &S,
) -> Result<AdjacencyResult, SourceError> {
    let previous = source.query_before_date(target)?.and_then(neighbour);
    let next = source.query_after_date(target)?.and_then(neighbour);

    tracing::debug!(
        "Neighbours of {}: previous={:?} next={:?}",
        target,
        previous.as_ref().map(|p| &p.uid),
        next.as_ref().map(|p| &p.uid)
    );

    Ok(AdjacencyResult { previous, next })
}

fn neighbour(doc: RawDocument) -> Option<PostSummary> {
    match project(&doc) {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::warn!("Ignoring neighbouring document: {}", e);
            None
        }
    }
}
