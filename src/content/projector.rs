//! Projection of raw CMS documents into posts
//!
//! This is the validation boundary: a document without a uid or a title is
//! rejected, every other missing or malformed field degrades to an empty
//! value so a single bad entry never takes a listing down.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::post::{Post, PostContentSection, PostSummary};
use super::raw::RawDocument;
use super::richtext::{to_plain_text, RichTextBlock};
use super::timestamp::Timestamp;

/// A raw document lacks a required field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("document {} has no uid", .id.as_deref().unwrap_or("<unknown>"))]
    MissingUid { id: Option<String> },

    #[error("document {uid} has no title")]
    MissingTitle { uid: String },
}

/// Project a raw document into a list summary
pub fn project(raw: &RawDocument) -> Result<PostSummary, ProjectionError> {
    let uid = raw
        .uid
        .as_deref()
        .map(str::trim)
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| ProjectionError::MissingUid { id: raw.id.clone() })?
        .to_string();

    let title = raw
        .field("title")
        .and_then(field_text)
        .ok_or_else(|| ProjectionError::MissingTitle { uid: uid.clone() })?;

    let publication_date = parse_timestamp(raw.first_publication_date.as_deref(), &uid);

    Ok(PostSummary {
        publication_date,
        title,
        subtitle: text_or_empty(raw, "subtitle"),
        author: text_or_empty(raw, "author"),
        uid,
    })
}

/// Project a raw document into a full post
pub fn project_post(raw: &RawDocument) -> Result<Post, ProjectionError> {
    let summary = project(raw)?;

    let banner_url = raw
        .field("banner")
        .and_then(|banner| banner.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let content = raw
        .field("content")
        .and_then(Value::as_array)
        .map(|sections| sections.iter().filter_map(content_section).collect())
        .unwrap_or_default();

    let last_publication_date =
        parse_timestamp(raw.last_publication_date.as_deref(), &summary.uid);

    Ok(Post {
        summary,
        banner_url,
        content,
        last_publication_date,
    })
}

/// Project every document of a page, skipping the ones that fail
pub fn project_all(docs: &[RawDocument]) -> Vec<PostSummary> {
    docs.iter()
        .filter_map(|doc| match project(doc) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Skipping document: {}", e);
                None
            }
        })
        .collect()
}

/// Plain text of a field stored either as a string or as rich text
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(_) => Some(to_plain_text(&rich_text(value))),
        _ => None,
    }
}

fn text_or_empty(raw: &RawDocument, name: &str) -> String {
    raw.field(name).and_then(field_text).unwrap_or_default()
}

/// Decode rich-text blocks, dropping blocks that do not decode
fn rich_text(value: &Value) -> Vec<RichTextBlock> {
    value
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|block| match RichTextBlock::deserialize(block) {
                    Ok(block) => Some(block),
                    Err(e) => {
                        tracing::debug!("Dropping malformed rich-text block: {}", e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn content_section(value: &Value) -> Option<PostContentSection> {
    let section = value.as_object()?;

    let heading = section
        .get("heading")
        .and_then(field_text)
        .filter(|h| !h.trim().is_empty());

    let body = section.get("body").map(rich_text).unwrap_or_default();

    Some(PostContentSection { heading, body })
}

fn parse_timestamp(raw: Option<&str>, uid: &str) -> Option<Timestamp> {
    let raw = raw?;
    match Timestamp::parse(raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!("Ignoring date of {}: {}", uid, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> RawDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_project_rich_text_fields() {
        let raw = doc(json!({
            "uid": "como-utilizar-hooks",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": [{"type": "heading1", "text": "Como utilizar Hooks", "spans": []}],
                "subtitle": [{"type": "paragraph", "text": "Pensando em sincronização", "spans": []}],
                "author": "Joseph Oliveira"
            }
        }));

        let summary = project(&raw).unwrap();
        assert_eq!(summary.uid, "como-utilizar-hooks");
        assert_eq!(summary.title, "Como utilizar Hooks");
        assert_eq!(summary.subtitle, "Pensando em sincronização");
        assert_eq!(summary.author, "Joseph Oliveira");
        assert_eq!(
            summary.publication_date.unwrap().as_str(),
            "2021-03-15T19:25:28+0000"
        );
    }

    #[test]
    fn test_missing_uid() {
        let raw = doc(json!({"id": "X1", "data": {"title": "Hello"}}));
        assert_eq!(
            project(&raw),
            Err(ProjectionError::MissingUid {
                id: Some("X1".to_string())
            })
        );

        let blank = doc(json!({"uid": "  ", "data": {"title": "Hello"}}));
        assert!(matches!(
            project(&blank),
            Err(ProjectionError::MissingUid { .. })
        ));
    }

    #[test]
    fn test_missing_title() {
        let raw = doc(json!({"uid": "a", "data": {"title": null, "author": "x"}}));
        assert_eq!(
            project(&raw),
            Err(ProjectionError::MissingTitle {
                uid: "a".to_string()
            })
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let raw = doc(json!({
            "uid": "a",
            "first_publication_date": "not a date",
            "data": {"title": "A", "subtitle": 42}
        }));
        let summary = project(&raw).unwrap();
        assert_eq!(summary.subtitle, "");
        assert_eq!(summary.author, "");
        assert!(summary.publication_date.is_none());
    }

    #[test]
    fn test_project_all_skips_malformed() {
        let docs = vec![
            doc(json!({"uid": "a", "data": {"title": "A"}})),
            doc(json!({"data": {"title": "no uid"}})),
            doc(json!({"uid": "c", "data": {"title": "C"}})),
        ];
        let uids: Vec<_> = project_all(&docs).into_iter().map(|s| s.uid).collect();
        assert_eq!(uids, vec!["a", "c"]);
    }

    #[test]
    fn test_project_post() {
        let raw = doc(json!({
            "uid": "hooks",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "last_publication_date": "2021-03-20T10:00:00+0000",
            "data": {
                "title": "Hooks",
                "author": "Ana",
                "banner": {"url": "https://images.example/banner.png"},
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [
                            {"type": "paragraph", "text": "Lorem ipsum", "spans": []},
                            "not a block"
                        ]
                    },
                    {"heading": [{"type": "heading2", "text": "Cras laoreet", "spans": []}], "body": []},
                    {"heading": "", "body": null},
                    "garbage"
                ]
            }
        }));

        let post = project_post(&raw).unwrap();
        assert_eq!(post.banner_url, "https://images.example/banner.png");
        assert_eq!(post.content.len(), 3);
        assert_eq!(post.content[0].heading.as_deref(), Some("Proin et varius"));
        assert_eq!(post.content[0].body.len(), 1);
        assert_eq!(post.content[1].heading.as_deref(), Some("Cras laoreet"));
        assert!(post.content[2].heading.is_none());
        assert!(post.content[2].body.is_empty());
        assert_eq!(
            post.last_publication_date.unwrap().as_str(),
            "2021-03-20T10:00:00+0000"
        );
    }

    #[test]
    fn test_project_post_without_body_fields() {
        let raw = doc(json!({"uid": "bare", "data": {"title": "Bare"}}));
        let post = project_post(&raw).unwrap();
        assert_eq!(post.banner_url, "");
        assert!(post.content.is_empty());
        assert!(post.last_publication_date.is_none());
    }
}
