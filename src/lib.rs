//! spacetraveling: derived-content core for a headless-CMS blog
//!
//! Raw documents from a content API are projected into post summaries,
//! accumulated into a paginated feed, and turned into display-ready post
//! pages with an estimated reading time and previous/next navigation.
//! The content provider is reached only through the [`source::ContentSource`]
//! capability.

pub mod adjacent;
pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod helpers;
pub mod server;
pub mod source;
pub mod view;

use anyhow::{Context, Result};
use std::path::Path;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding exported CMS documents
    pub source_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)
                .with_context(|| format!("failed to load {:?}", config_path))?
        } else {
            config::BlogConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
        })
    }

    /// Load the local content source
    pub fn source(&self) -> Result<source::MemorySource> {
        let source = source::MemorySource::load_dir(&self.source_dir, &self.config.document_type)?;
        Ok(source)
    }

    /// Reading-time estimator at the configured speed
    pub fn estimator(&self) -> content::ReadingTimeEstimator {
        content::ReadingTimeEstimator::new(self.config.words_per_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.page_size, 2);
        assert_eq!(blog.source_dir, dir.path().join("content"));
    }

    #[test]
    fn test_new_reads_config_and_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "source_dir: exports\nwords_per_minute: 100\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("exports")).unwrap();
        fs::write(
            dir.path().join("exports/post.json"),
            r#"{"uid": "a", "type": "posts", "data": {"title": "A"}}"#,
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.estimator().words_per_minute(), 100);
        assert_eq!(blog.source().unwrap().len(), 1);
    }
}
