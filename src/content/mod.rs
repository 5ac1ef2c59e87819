//! Content module - raw CMS documents, posts and rich-text processing
//!
//! Everything here is a pure transformation over data supplied by a content
//! source; nothing in this module performs I/O.

mod post;
mod projector;
mod raw;
mod reading_time;
mod richtext;
mod timestamp;

pub use post::{Post, PostContentSection, PostSummary};
pub use projector::{project, project_all, project_post, ProjectionError};
pub use raw::{RawDocument, RawPageResult};
pub use reading_time::{count_words, ReadingTimeEstimator, DEFAULT_WORDS_PER_MINUTE};
pub use richtext::{
    to_markup, to_markup_lossy, to_plain_text, BlockKind, ImageDimensions, RenderError,
    RichTextBlock, Span, SpanData, SpanKind,
};
pub use timestamp::{InvalidTimestamp, Timestamp};
