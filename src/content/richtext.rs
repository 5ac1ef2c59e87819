//! Rich-text rendering
//!
//! Rich text arrives from the CMS as an array of blocks, each holding plain
//! text plus inline spans over character offsets. It is rendered two ways:
//! plain text (for word counts and titles) and escaped HTML (for display).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::helpers::{html_escape, is_safe_href};

/// Errors raised while rendering rich text to markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("span {start}..{end} is out of bounds for block text of {len} characters")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("span {second:?} partially overlaps span {first:?}")]
    CrossingSpans {
        first: (usize, usize),
        second: (usize, usize),
    },
}

/// Block type of a rich-text block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    /// `heading1` .. `heading6`
    Heading(u8),
    Paragraph,
    Preformatted,
    ListItem,
    OrderedListItem,
    Image,
    /// Any block type this renderer has no dedicated markup for
    Other(String),
}

impl From<String> for BlockKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "paragraph" => Self::Paragraph,
            "preformatted" => Self::Preformatted,
            "list-item" => Self::ListItem,
            "o-list-item" => Self::OrderedListItem,
            "image" => Self::Image,
            _ => match kind.strip_prefix("heading").and_then(|n| n.parse::<u8>().ok()) {
                Some(level @ 1..=6) => Self::Heading(level),
                _ => Self::Other(kind),
            },
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Heading(level) => format!("heading{}", level),
            BlockKind::Paragraph => "paragraph".to_string(),
            BlockKind::Preformatted => "preformatted".to_string(),
            BlockKind::ListItem => "list-item".to_string(),
            BlockKind::OrderedListItem => "o-list-item".to_string(),
            BlockKind::Image => "image".to_string(),
            BlockKind::Other(kind) => kind,
        }
    }
}

/// Inline span type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink,
    Other(String),
}

impl From<String> for SpanKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "strong" => Self::Strong,
            "em" => Self::Em,
            "hyperlink" => Self::Hyperlink,
            _ => Self::Other(kind),
        }
    }
}

impl From<SpanKind> for String {
    fn from(kind: SpanKind) -> Self {
        match kind {
            SpanKind::Strong => "strong".to_string(),
            SpanKind::Em => "em".to_string(),
            SpanKind::Hyperlink => "hyperlink".to_string(),
            SpanKind::Other(kind) => kind,
        }
    }
}

/// Extra data carried by a span (link target for hyperlinks)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// An inline span over `start..end` character offsets of a block's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind,
            data: None,
        }
    }

    pub fn strong(start: usize, end: usize) -> Self {
        Self::new(SpanKind::Strong, start, end)
    }

    pub fn em(start: usize, end: usize) -> Self {
        Self::new(SpanKind::Em, start, end)
    }

    pub fn hyperlink(start: usize, end: usize, url: &str) -> Self {
        Self {
            data: Some(SpanData {
                url: Some(url.to_string()),
                target: None,
            }),
            ..Self::new(SpanKind::Hyperlink, start, end)
        }
    }

    /// Opening and closing tags for this span
    fn tags(&self) -> (String, String) {
        match &self.kind {
            SpanKind::Strong => ("<strong>".to_string(), "</strong>".to_string()),
            SpanKind::Em => ("<em>".to_string(), "</em>".to_string()),
            SpanKind::Hyperlink => {
                match self.data.as_ref() {
                    Some(SpanData {
                        url: Some(url),
                        target,
                    }) if is_safe_href(url) => {
                        let target = target
                            .as_deref()
                            .map(|t| format!(r#" target="{}" rel="noopener""#, html_escape(t)))
                            .unwrap_or_default();
                        (
                            format!(r#"<a href="{}"{}>"#, html_escape(url), target),
                            "</a>".to_string(),
                        )
                    }
                    // Unsafe or missing target: keep the text, drop the link
                    _ => (String::new(), String::new()),
                }
            }
            SpanKind::Other(kind) => (
                format!(r#"<span class="{}">"#, html_escape(kind)),
                "</span>".to_string(),
            ),
        }
    }
}

/// Pixel size of an image block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// A single rich-text block
///
/// Text blocks use `text` and `spans`; image blocks use `url`, `alt` and
/// `dimensions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
}

impl RichTextBlock {
    pub fn new(kind: BlockKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
            dimensions: None,
        }
    }

    pub fn image(url: &str, alt: Option<&str>) -> Self {
        Self {
            url: Some(url.to_string()),
            alt: alt.map(str::to_string),
            ..Self::new(BlockKind::Image, "")
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn heading(level: u8, text: &str) -> Self {
        Self::new(BlockKind::Heading(level), text)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

/// Concatenate the text of every block, separated by a single space
///
/// Spans never affect the result.
pub fn to_plain_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render blocks to HTML
///
/// Block text is escaped; span-derived tags are the only markup emitted.
pub fn to_markup(blocks: &[RichTextBlock]) -> Result<String, RenderError> {
    render_blocks(blocks, true)
}

/// Render blocks to HTML, falling back to unstyled text when spans are malformed
pub fn to_markup_lossy(blocks: &[RichTextBlock]) -> String {
    match to_markup(blocks) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Rendering rich text without styling: {}", e);
            render_blocks(blocks, false).unwrap_or_default()
        }
    }
}

fn render_blocks(blocks: &[RichTextBlock], styled: bool) -> Result<String, RenderError> {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list_tag = match block.kind {
            BlockKind::ListItem => Some("ul"),
            BlockKind::OrderedListItem => Some("ol"),
            _ => None,
        };

        if open_list != list_tag {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        let line_breaks = block.kind != BlockKind::Preformatted;
        let spans: &[Span] = if styled { &block.spans } else { &[] };
        let inner = render_inline(&block.text, spans, line_breaks)?;

        match &block.kind {
            BlockKind::Heading(level) => {
                html.push_str(&format!("<h{0}>{1}</h{0}>", level, inner));
            }
            BlockKind::Preformatted => html.push_str(&format!("<pre>{}</pre>", inner)),
            BlockKind::ListItem | BlockKind::OrderedListItem => {
                html.push_str(&format!("<li>{}</li>", inner));
            }
            BlockKind::Image => html.push_str(&render_image(block)),
            BlockKind::Paragraph | BlockKind::Other(_) => {
                html.push_str(&format!("<p>{}</p>", inner));
            }
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    Ok(html)
}

/// Image markup, or nothing when the block has no usable URL
fn render_image(block: &RichTextBlock) -> String {
    match block.url.as_deref() {
        Some(url) if is_safe_href(url) => {
            let size = block
                .dimensions
                .map(|d| format!(r#" width="{}" height="{}""#, d.width, d.height))
                .unwrap_or_default();
            format!(
                r#"<p class="block-img"><img src="{}" alt="{}"{} /></p>"#,
                html_escape(url),
                html_escape(block.alt.as_deref().unwrap_or_default()),
                size
            )
        }
        _ => String::new(),
    }
}

struct OpenSpan {
    start: usize,
    end: usize,
    close: String,
}

/// Render one block's text with its spans applied
fn render_inline(text: &str, spans: &[Span], line_breaks: bool) -> Result<String, RenderError> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    for span in spans {
        if span.start > span.end || span.end > len {
            return Err(RenderError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }
    }

    // Outer spans open first at a shared offset
    let mut ordered: Vec<&Span> = spans.iter().filter(|s| s.start < s.end).collect();
    ordered.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    let mut stack: Vec<OpenSpan> = Vec::new();
    let mut next = 0;

    for pos in 0..=len {
        while stack.last().is_some_and(|top| top.end == pos) {
            if let Some(top) = stack.pop() {
                flush_run(&mut out, &mut run, line_breaks);
                out.push_str(&top.close);
            }
        }

        while let Some(span) = ordered.get(next).filter(|s| s.start == pos) {
            if let Some(top) = stack.last() {
                if span.end > top.end {
                    return Err(RenderError::CrossingSpans {
                        first: (top.start, top.end),
                        second: (span.start, span.end),
                    });
                }
            }

            let (open, close) = span.tags();
            flush_run(&mut out, &mut run, line_breaks);
            out.push_str(&open);
            stack.push(OpenSpan {
                start: span.start,
                end: span.end,
                close,
            });
            next += 1;
        }

        if let Some(c) = chars.get(pos) {
            run.push(*c);
        }
    }

    flush_run(&mut out, &mut run, line_breaks);
    Ok(out)
}

fn flush_run(out: &mut String, run: &mut String, line_breaks: bool) {
    if run.is_empty() {
        return;
    }
    let escaped = html_escape(run);
    if line_breaks {
        out.push_str(&escaped.replace('\n', "<br />"));
    } else {
        out.push_str(&escaped);
    }
    run.clear();
}
