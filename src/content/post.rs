//! Post models

use serde::{Deserialize, Serialize};

use super::richtext::RichTextBlock;
use super::timestamp::Timestamp;

/// The minimal shape of a post used by list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique, stable identifier (never empty)
    pub uid: String,

    /// Publication date as supplied by the source
    pub publication_date: Option<Timestamp>,

    pub title: String,

    pub subtitle: String,

    pub author: String,
}

/// One section of a post body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContentSection {
    pub heading: Option<String>,
    pub body: Vec<RichTextBlock>,
}

impl PostContentSection {
    pub fn new(heading: Option<&str>, body: Vec<RichTextBlock>) -> Self {
        Self {
            heading: heading.map(str::to_string),
            body,
        }
    }
}

/// A full post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Banner image URL (empty when absent)
    pub banner_url: String,

    pub content: Vec<PostContentSection>,

    pub last_publication_date: Option<Timestamp>,
}

impl Post {
    pub fn uid(&self) -> &str {
        &self.summary.uid
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    pub fn publication_date(&self) -> Option<&Timestamp> {
        self.summary.publication_date.as_ref()
    }
}
