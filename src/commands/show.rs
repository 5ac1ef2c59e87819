//! Show a single post page

use anyhow::{anyhow, Result};

use super::display_date;
use crate::content::PostSummary;
use crate::helpers::date_xml;
use crate::view::PostView;
use crate::Blog;

/// Print the post with the given uid
pub fn run(blog: &Blog, uid: &str) -> Result<()> {
    let source = blog.source()?;

    let view = PostView::load(uid, &source, &blog.estimator()).map_err(|e| {
        if e.is_not_found() {
            tracing::debug!("Post {} unavailable: {}", uid, e);
            anyhow!("no such post: {}", uid)
        } else {
            e.into()
        }
    })?;

    print!("{}", render(&view, &blog.config.date_format));
    Ok(())
}

/// Lay a post page out as terminal text
pub fn render(view: &PostView, date_format: &str) -> String {
    let post = &view.post;
    let mut out = String::new();

    out.push_str(&format!("{}\n", post.title()));
    out.push_str(&format!(
        "{} · {} · {} min\n",
        display_date(post.publication_date(), date_format),
        if post.summary.author.is_empty() {
            "-"
        } else {
            post.summary.author.as_str()
        },
        view.reading_time
    ));
    if let Some(updated) = &post.last_publication_date {
        out.push_str(&format!("Updated: {}\n", date_xml(updated.instant())));
    }
    if !post.banner_url.is_empty() {
        out.push_str(&format!("Banner: {}\n", post.banner_url));
    }

    for section in &view.sections {
        out.push('\n');
        if let Some(heading) = &section.heading {
            out.push_str(&format!("## {}\n", heading));
        }
        out.push_str(&section.html);
        out.push('\n');
    }

    let nav = &view.navigation;
    if nav.previous.is_some() || nav.next.is_some() {
        out.push('\n');
    }
    if let Some(previous) = &nav.previous {
        out.push_str(&format!("Previous: {}\n", nav_label(previous)));
    }
    if let Some(next) = &nav.next {
        out.push_str(&format!("Next: {}\n", nav_label(next)));
    }

    out
}

fn nav_label(post: &PostSummary) -> String {
    format!("{} [{}]", post.title, post.uid)
}
