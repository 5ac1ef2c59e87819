//! Estimated reading time

use super::post::PostContentSection;
use super::richtext::to_plain_text;

/// Reading speed used when none is configured
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimates reading minutes from post content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTimeEstimator {
    words_per_minute: u32,
}

impl ReadingTimeEstimator {
    /// Create an estimator; a speed of zero falls back to the default
    pub fn new(words_per_minute: u32) -> Self {
        let words_per_minute = if words_per_minute == 0 {
            DEFAULT_WORDS_PER_MINUTE
        } else {
            words_per_minute
        };
        Self { words_per_minute }
    }

    pub fn words_per_minute(&self) -> u32 {
        self.words_per_minute
    }

    /// Minutes needed to read `content`, rounded up
    ///
    /// Any content at all reads as at least one minute; no words read as zero.
    pub fn estimate(&self, content: &[PostContentSection]) -> u32 {
        let total = count_words(content) as u64;
        let minutes = total.div_ceil(u64::from(self.words_per_minute));
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

impl Default for ReadingTimeEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_MINUTE)
    }
}

/// Count whitespace-separated words in every heading and body
pub fn count_words(content: &[PostContentSection]) -> usize {
    content
        .iter()
        .map(|section| {
            let heading = section
                .heading
                .as_deref()
                .map(|h| h.split_whitespace().count())
                .unwrap_or(0);
            let body = to_plain_text(&section.body).split_whitespace().count();
            heading + body
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::richtext::{RichTextBlock, Span};

    fn section(heading: Option<&str>, paragraphs: &[&str]) -> PostContentSection {
        PostContentSection::new(
            heading,
            paragraphs.iter().map(|p| RichTextBlock::paragraph(p)).collect(),
        )
    }

    #[test]
    fn test_short_post_reads_in_one_minute() {
        let content = vec![section(Some("Intro"), &["hello world"])];
        assert_eq!(count_words(&content), 3);
        assert_eq!(ReadingTimeEstimator::default().estimate(&content), 1);
    }

    #[test]
    fn test_empty_content_is_zero() {
        let estimator = ReadingTimeEstimator::default();
        assert_eq!(estimator.estimate(&[]), 0);
        assert_eq!(estimator.estimate(&[section(Some("   "), &["", " \n "])]), 0);
    }

    #[test]
    fn test_rounds_up() {
        let words = vec!["word"; 401].join(" ");
        let content = vec![section(None, &[words.as_str()])];
        assert_eq!(ReadingTimeEstimator::default().estimate(&content), 3);
        assert_eq!(ReadingTimeEstimator::new(401).estimate(&content), 1);
    }

    #[test]
    fn test_exact_multiple() {
        let words = vec!["word"; 400].join(" ");
        let content = vec![section(None, &[words.as_str()])];
        assert_eq!(ReadingTimeEstimator::default().estimate(&content), 2);
    }

    #[test]
    fn test_heading_and_blocks_counted_across_sections() {
        let content = vec![
            section(Some("Chapter one"), &["a b", "c"]),
            section(None, &["d e f"]),
        ];
        // Blocks are joined with a space, so adjacent blocks never merge words
        assert_eq!(count_words(&content), 8);
    }

    #[test]
    fn test_spans_do_not_change_count() {
        let styled = vec![PostContentSection::new(
            None,
            vec![RichTextBlock::paragraph("bold move").with_span(Span::strong(0, 4))],
        )];
        assert_eq!(count_words(&styled), 2);
    }

    #[test]
    fn test_monotonic_in_word_count() {
        let estimator = ReadingTimeEstimator::new(3);
        let mut previous = 0;
        for n in 0..20 {
            let words = vec!["w"; n].join(" ");
            let minutes = estimator.estimate(&[section(None, &[words.as_str()])]);
            assert!(minutes >= previous);
            assert_eq!(minutes == 0, n == 0);
            previous = minutes;
        }
    }

    #[test]
    fn test_zero_speed_uses_default() {
        assert_eq!(
            ReadingTimeEstimator::new(0).words_per_minute(),
            DEFAULT_WORDS_PER_MINUTE
        );
    }
}
