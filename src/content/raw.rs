//! Raw CMS records
//!
//! These mirror the JSON the content API returns and are deliberately loose:
//! every field is optional and `data` is an untyped map. Validation happens in
//! the projector, not here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An unvalidated document as returned by the content source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// CMS custom type (e.g. `posts`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub last_publication_date: Option<String>,

    /// Custom fields keyed by CMS-defined names
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl RawDocument {
    /// Look up a custom field, treating JSON `null` as absent
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|v| !v.is_null())
    }
}

/// One page of a paginated query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPageResult {
    #[serde(default)]
    pub results: Vec<RawDocument>,

    /// Token for the following page; `None` on the last page
    #[serde(default)]
    pub next_page: Option<String>,
}

impl RawPageResult {
    /// The next-page token, with empty strings treated as "no further page"
    pub fn next_token(&self) -> Option<&str> {
        self.next_page.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_document() {
        let doc: RawDocument =
            serde_json::from_str(r#"{"uid": "hello", "data": {"title": null, "author": "Ana"}}"#)
                .unwrap();
        assert_eq!(doc.uid.as_deref(), Some("hello"));
        assert!(doc.first_publication_date.is_none());
        assert!(doc.field("title").is_none());
        assert_eq!(doc.field("author"), Some(&Value::from("Ana")));
    }

    #[test]
    fn test_next_token() {
        let mut page = RawPageResult::default();
        assert_eq!(page.next_token(), None);
        page.next_page = Some(String::new());
        assert_eq!(page.next_token(), None);
        page.next_page = Some("page=2&pageSize=2".to_string());
        assert_eq!(page.next_token(), Some("page=2&pageSize=2"));
    }
}
