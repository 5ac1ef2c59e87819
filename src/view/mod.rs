//! Display-ready post pages
//!
//! A [`PostView`] bundles everything a single post page shows: the post, its
//! reading time, the rendered body of each section and the navigation links.

use serde::Serialize;
use thiserror::Error;

use crate::adjacent::{self, AdjacencyResult};
use crate::content::{project_post, to_markup_lossy, Post, ProjectionError, ReadingTimeEstimator};
use crate::source::{ContentSource, SourceError};

/// Errors raised while assembling a post page
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

impl ViewError {
    /// Whether the error means the post cannot be shown at all
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ViewError::Source(SourceError::NotFound(_)) | ViewError::Projection(_)
        )
    }
}

/// A content section rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub heading: Option<String>,
    /// Pre-sanitized HTML of the section body
    pub html: String,
}

/// Everything a post page displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub post: Post,
    /// Estimated reading time in minutes
    pub reading_time: u32,
    pub sections: Vec<RenderedSection>,
    pub navigation: AdjacencyResult,
}

impl PostView {
    /// Look a post up by uid and build its page
    pub fn load<S: ContentSource + ?Sized>(
        uid: &str,
        source: &S,
        estimator: &ReadingTimeEstimator,
    ) -> Result<Self, ViewError> {
        let raw = source.get_by_uid(uid)?;
        let post = project_post(&raw)?;
        Ok(Self::build(post, source, estimator)?)
    }

    /// Build the page of an already projected post
    pub fn build<S: ContentSource + ?Sized>(
        post: Post,
        source: &S,
        estimator: &ReadingTimeEstimator,
    ) -> Result<Self, SourceError> {
        let reading_time = estimator.estimate(&post.content);

        let sections = post
            .content
            .iter()
            .map(|section| RenderedSection {
                heading: section.heading.clone(),
                html: to_markup_lossy(&section.body),
            })
            .collect();

        let navigation = match post.publication_date() {
            Some(date) => adjacent::resolve(date, source)?,
            None => AdjacencyResult::default(),
        };

        Ok(Self {
            post,
            reading_time,
            sections,
            navigation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RawDocument;
    use crate::source::MemorySource;
    use serde_json::json;

    fn source() -> MemorySource {
        let docs: Vec<RawDocument> = serde_json::from_value(json!([
            {
                "uid": "first",
                "first_publication_date": "2021-01-01T00:00:00+0000",
                "data": {"title": "First"}
            },
            {
                "uid": "hooks",
                "first_publication_date": "2021-02-01T00:00:00+0000",
                "data": {
                    "title": "Como utilizar Hooks",
                    "author": "Joseph Oliveira",
                    "banner": {"url": "https://images.example/hooks.png"},
                    "content": [
                        {
                            "heading": "Intro",
                            "body": [{"type": "paragraph", "text": "hello world", "spans": [
                                {"start": 0, "end": 5, "type": "strong"}
                            ]}]
                        },
                        {
                            "heading": "Broken",
                            "body": [{"type": "paragraph", "text": "oops", "spans": [
                                {"start": 0, "end": 99, "type": "em"}
                            ]}]
                        }
                    ]
                }
            },
            {
                "uid": "untitled",
                "first_publication_date": "2021-03-01T00:00:00+0000",
                "data": {}
            },
            {
                "uid": "last",
                "first_publication_date": "2021-04-01T00:00:00+0000",
                "data": {"title": "Last"}
            }
        ]))
        .unwrap();
        MemorySource::new(docs)
    }

    #[test]
    fn test_load_post_view() {
        let view = PostView::load("hooks", &source(), &ReadingTimeEstimator::default()).unwrap();

        assert_eq!(view.post.title(), "Como utilizar Hooks");
        assert_eq!(view.reading_time, 1);
        assert_eq!(
            view.sections,
            vec![
                RenderedSection {
                    heading: Some("Intro".to_string()),
                    html: "<p><strong>hello</strong> world</p>".to_string(),
                },
                RenderedSection {
                    heading: Some("Broken".to_string()),
                    html: "<p>oops</p>".to_string(),
                },
            ]
        );
        assert_eq!(
            view.navigation.previous.as_ref().map(|p| p.uid.as_str()),
            Some("first")
        );
        // The next post by date cannot be projected, so there is no link
        assert_eq!(view.navigation.next, None);
    }

    #[test]
    fn test_unknown_uid_is_not_found() {
        let err = PostView::load("nope", &source(), &ReadingTimeEstimator::default()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no such post: nope");
    }

    #[test]
    fn test_unprojectable_post_is_not_found() {
        let err =
            PostView::load("untitled", &source(), &ReadingTimeEstimator::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_undated_post_has_no_navigation() {
        let source = source();
        let mut post = project_post(&source.get_by_uid("hooks").unwrap()).unwrap();
        post.summary.publication_date = None;

        let view = PostView::build(post, &source, &ReadingTimeEstimator::default()).unwrap();
        assert_eq!(view.navigation, AdjacencyResult::default());
    }
}
