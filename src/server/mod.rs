//! JSON API serving the post feed and post pages
//!
//! `GET /api/posts` returns the first page, and each page carries the URL of
//! the next one (`next_page`), which is what a "load more" button fetches.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{PostSummary, RawPageResult, ReadingTimeEstimator};
use crate::feed::{Cursor, Feed};
use crate::source::{ContentSource, SourceError};
use crate::view::{PostView, ViewError};
use crate::Blog;

/// Server state
struct ServerState {
    source: Arc<dyn ContentSource>,
    page_size: usize,
    estimator: ReadingTimeEstimator,
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    cursor: Option<String>,
}

/// One page of post summaries as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostsPage {
    pub results: Vec<PostSummary>,
    /// URL of the following page, `null` on the last one
    pub next_page: Option<String>,
}

/// Error response with a JSON body
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<SourceError> for ApiError {
    fn from(e: SourceError) -> Self {
        let status = match &e {
            SourceError::NotFound(_) => StatusCode::NOT_FOUND,
            SourceError::InvalidCursor(_) | SourceError::InvalidPageSize => StatusCode::BAD_REQUEST,
            SourceError::Io(_) | SourceError::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<ViewError> for ApiError {
    fn from(e: ViewError) -> Self {
        match e {
            ViewError::Source(e) => e.into(),
            // A post that cannot be projected cannot be shown
            ViewError::Projection(e) => Self {
                status: StatusCode::NOT_FOUND,
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        }
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Build the API router over a content source
pub fn router(
    source: Arc<dyn ContentSource>,
    page_size: usize,
    estimator: ReadingTimeEstimator,
) -> Router {
    let state = Arc::new(ServerState {
        source,
        page_size,
        estimator,
    });

    Router::new()
        .route("/api/posts", get(posts_handler))
        .route("/api/posts/:uid", get(post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let source: Arc<dyn ContentSource> = Arc::new(blog.source()?);
    let app = router(source, blog.config.page_size, blog.estimator());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}/api/posts", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostsPage>, ApiError> {
    let page = match query.cursor {
        Some(cursor) => state.source.fetch_page(&Cursor::new(cursor))?,
        None => state.source.fetch_first_page(state.page_size)?,
    };
    Ok(Json(posts_page(&page)))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<PostView>, ApiError> {
    let view = PostView::load(&uid, state.source.as_ref(), &state.estimator)?;
    Ok(Json(view))
}

fn posts_page(page: &RawPageResult) -> PostsPage {
    let feed = Feed::seed(page);
    PostsPage {
        results: feed.items().to_vec(),
        next_page: feed.next_cursor().map(next_page_url),
    }
}

fn next_page_url(cursor: &Cursor) -> String {
    format!(
        "/api/posts?cursor={}",
        utf8_percent_encode(cursor.as_str(), NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RawDocument;
    use crate::source::MemorySource;
    use serde_json::json;

    fn state() -> Arc<ServerState> {
        let docs: Vec<RawDocument> = serde_json::from_value(json!([
            {"uid": "a", "first_publication_date": "2021-01-01T00:00:00+0000", "data": {"title": "A"}},
            {"uid": "b", "first_publication_date": "2021-02-01T00:00:00+0000", "data": {"title": "B"}},
            {"uid": "c", "first_publication_date": "2021-03-01T00:00:00+0000", "data": {"title": "C"}}
        ]))
        .unwrap();
        Arc::new(ServerState {
            source: Arc::new(MemorySource::new(docs)),
            page_size: 2,
            estimator: ReadingTimeEstimator::default(),
        })
    }

    fn uids(page: &PostsPage) -> Vec<&str> {
        page.results.iter().map(|p| p.uid.as_str()).collect()
    }

    #[test]
    fn test_next_page_url_encodes_cursor() {
        assert_eq!(
            next_page_url(&Cursor::new("page=2&pageSize=2")),
            "/api/posts?cursor=page%3D2%26pageSize%3D2"
        );
    }

    #[tokio::test]
    async fn test_posts_pages() {
        let first = posts_handler(State(state()), Query(PageQuery::default()))
            .await
            .unwrap()
            .0;
        assert_eq!(uids(&first), vec!["c", "b"]);
        assert_eq!(
            first.next_page.as_deref(),
            Some("/api/posts?cursor=page%3D2%26pageSize%3D2")
        );

        let query = PageQuery {
            cursor: Some("page=2&pageSize=2".to_string()),
        };
        let second = posts_handler(State(state()), Query(query))
            .await
            .unwrap()
            .0;
        assert_eq!(uids(&second), vec!["a"]);
        assert_eq!(second.next_page, None);
    }

    #[tokio::test]
    async fn test_invalid_cursor_is_bad_request() {
        let query = PageQuery {
            cursor: Some("bogus".to_string()),
        };
        let err = posts_handler(State(state()), Query(query))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_page() {
        let view = post_handler(State(state()), Path("b".to_string()))
            .await
            .unwrap()
            .0;
        assert_eq!(view.post.uid(), "b");
        assert_eq!(
            view.navigation.previous.map(|p| p.uid),
            Some("a".to_string())
        );
        assert_eq!(view.navigation.next.map(|p| p.uid), Some("c".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found() {
        let err = post_handler(State(state()), Path("zzz".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "no such post: zzz");
    }
}
