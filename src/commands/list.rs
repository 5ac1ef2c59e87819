//! List posts from the paginated feed

use anyhow::Result;

use super::display_date;
use crate::content::PostSummary;
use crate::feed::Feed;
use crate::helpers::truncate;
use crate::source::ContentSource;
use crate::Blog;

/// List posts, loading `pages` pages (or every page when `all` is set)
pub fn run(blog: &Blog, pages: usize, all: bool) -> Result<()> {
    let source = blog.source()?;
    let max_pages = if all { None } else { Some(pages.max(1)) };
    let feed = load_feed(&source, blog.config.page_size, max_pages)?;

    println!("Posts ({}):", feed.len());
    for post in feed.items() {
        println!("{}", summary_line(post, &blog.config.date_format));
    }

    if let Some(cursor) = feed.next_cursor() {
        println!("More posts available (cursor: {})", cursor);
    }

    Ok(())
}

/// Seed a feed and keep loading pages until `max_pages` or the end
pub fn load_feed<S: ContentSource + ?Sized>(
    source: &S,
    page_size: usize,
    max_pages: Option<usize>,
) -> Result<Feed> {
    let mut feed = Feed::fetch_first(source, page_size)?;
    let mut loaded = 1;

    while max_pages.map_or(true, |max| loaded < max) {
        match feed.load_more(source)? {
            Some(next) => {
                feed = next;
                loaded += 1;
            }
            None => break,
        }
    }

    tracing::info!("Loaded {} posts over {} page(s)", feed.len(), loaded);
    Ok(feed)
}

fn summary_line(post: &PostSummary, date_format: &str) -> String {
    let mut line = format!(
        "  {} - {} [{}]",
        display_date(post.publication_date.as_ref(), date_format),
        post.title,
        post.uid
    );
    if !post.subtitle.is_empty() {
        line.push_str(&format!("\n      {}", truncate(&post.subtitle, 72, None)));
    }
    if !post.author.is_empty() {
        line.push_str(&format!("\n      by {}", post.author));
    }
    line
}
