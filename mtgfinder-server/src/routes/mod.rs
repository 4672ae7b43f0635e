//! Web routes.

use std::sync::Arc;

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::{Next, from_fn, from_fn_with_state},
    response::Response,
    routing::get,
};

use mtgfinder_model::{request::SearchQuery, response::CardResultPage};

use serde::Serialize;

use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};

use crate::app::{AppError, AppErrorKind, AppState, app_headers, handle_panic, render_error_pages};

pub mod assets;
pub mod search;

/// Builds the router serving every page.
pub fn router(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/", get(search::home))
        .route("/autocomplete", get(search::autocomplete))
        .route("/search", get(search::paginate).post(search::search))
        .route("/static/{*path}", get(assets::serve_asset))
        .route("/healthz", get(health))
        .fallback(not_found)
        .layer(from_fn(app_headers))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    // axum automatically adds this extension.
                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                // By default `TraceLayer` will log 5xx responses but we're doing our specific
                // logging of errors so disable that
                .on_failure(()),
        )
        .layer(from_fn(log_app_errors))
        .layer(from_fn_with_state(state.clone(), render_error_pages))
        .layer(CompressionLayer::new())
        .with_state(state)
}

// Our middleware is responsible for logging error details internally
async fn log_app_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    // If the response contains an AppError Extension, log it.
    if let Some(err) = response.extensions().get::<Arc<AppError>>() {
        tracing::error!(?err, "an unexpected error occurred inside a handler");
    }
    response
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppErrorKind::NotFound.into()
}

/// Pagination links for a page of results.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pagination {
    /// The current page.
    pub page: u32,
    /// A link to the previous page, if there is one.
    pub previous: Option<String>,
    /// A link to the next page, if there is one.
    pub next: Option<String>,
}

impl Pagination {
    /// Creates the links around a page of results.
    ///
    /// Links repeat the literal search text and type filter, so following
    /// one pages through the same broad query.
    pub fn new(results: &CardResultPage) -> Result<Pagination, AppError> {
        let link = |page: u32| -> Result<String, AppError> {
            let query = SearchQuery::new(results.query.as_str(), results.card_type.as_str(), page)
                .to_query_string()?;
            Ok(format!("/search?{}", query))
        };

        Ok(Pagination {
            page: results.page,
            previous: results.previous_page().map(link).transpose()?,
            next: results.next_page().map(link).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_point_at_neighbouring_pages() {
        let results = CardResultPage {
            query: "Jace, the Mind Sculptor".into(),
            card_type: "planeswalker".into(),
            page: 2,
            has_more: true,
            ..Default::default()
        };

        let pagination = Pagination::new(&results).unwrap();

        assert_eq!(pagination.page, 2);
        assert_eq!(
            pagination.previous.as_deref(),
            Some("/search?search_query=Jace%2C+the+Mind+Sculptor&card_type=planeswalker&page=1")
        );
        assert_eq!(
            pagination.next.as_deref(),
            Some("/search?search_query=Jace%2C+the+Mind+Sculptor&card_type=planeswalker&page=3")
        );
    }

    #[test]
    fn single_page_has_no_links() {
        let results = CardResultPage {
            query: "Sol Ring".into(),
            page: 1,
            has_more: false,
            ..Default::default()
        };

        let pagination = Pagination::new(&results).unwrap();

        assert_eq!(pagination.previous, None);
        assert_eq!(pagination.next, None);
    }

    #[test]
    fn links_decode_to_the_same_search() {
        let results = CardResultPage {
            query: r#"!"Fire // Ice""#.into(),
            page: 1,
            has_more: true,
            ..Default::default()
        };

        let next = Pagination::new(&results).unwrap().next.unwrap();
        let query = SearchQuery::from_query_string(next.trim_start_matches("/search?")).unwrap();

        assert_eq!(query.search_query, r#"!"Fire // Ice""#);
        assert_eq!(query.card_type, "");
        assert_eq!(query.page(), 2);
    }
}
