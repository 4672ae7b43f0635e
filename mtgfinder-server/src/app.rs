//! MTG card finder general application items.

use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use anyhow::Error;

use axum::body::Body;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::{
    Form, Json,
    extract::{FromRequest, Query},
    response::{Html, IntoResponse, Response},
};

use derive_more::{Deref, Display, From};

use http::{HeaderValue, StatusCode, header};

use mtgfinder_model::ValidationError;

use serde::Serialize;

use crate::config::Config;
use crate::render::Templates;
use crate::scryfall::Client;
use crate::search::{SearchError, SearchService};

/// The message shown for any error the user cannot do anything about.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Shared server state.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// The port the server is binded to.
    pub port: u16,
    /// Card search, backed by the shared remote client.
    pub search: SearchService,
    /// The page templates.
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// See [`Config`] to learn more on what the options do.
    pub fn new(config: &Config) -> Result<AppState, Error> {
        let client = Client::new(&config.scryfall)?;

        Ok(AppState {
            port: config.server.port,
            search: SearchService::new(client),
            templates: Arc::new(Templates::new()?),
        })
    }

    /// Renders a page.
    pub fn render<S>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError>
    where
        S: Serialize,
    {
        Ok(Html(self.templates.render(name, ctx)?))
    }
}

impl Debug for AppState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

/// App headers.
pub async fn app_headers(request: Request, next: Next) -> Response {
    let mut res = next.run(request).await;

    res.headers_mut().extend([
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("frame-ancestors 'none'"),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
    ]);

    res
}

/// Renders the error page for any response carrying an [`ErrorPage`].
///
/// The status and extensions of the original response are kept.
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let html = match state.templates.render("error.html", &page) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(?err, "failed to render error page");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    Response::from_parts(parts, Body::from(html))
}

/// Turns a panic in a handler into the generic error page.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic message".to_owned()
    };

    AppError::from(AppErrorKind::Panic(details)).into_response()
}

/// The error page to render in place of a response body.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorPage {
    /// A user-friendly message of the error.
    pub message: String,
}

/// App Query extractor.
#[derive(Deref, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// App Form extractor.
#[derive(Deref, FromRequest)]
#[from_request(via(Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

/// App JSON responder.
#[derive(Deref)]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// An app error.
#[derive(Debug)]
pub struct AppError {
    kind: AppErrorKind,
    /// An optional override message.
    message: Option<String>,
}

impl AppError {
    /// Checks if an error is internal.
    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }

    /// The kind of error.
    pub fn kind(&self) -> &AppErrorKind {
        &self.kind
    }

    /// Attachs an override message to the error.
    pub fn with_message(self, message: impl Into<String>) -> AppError {
        AppError {
            message: Some(message.into()),
            ..self
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.message.as_ref() {
            f.write_str(message)
        } else {
            Display::fmt(&self.kind, f)
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            AppErrorKind::Query(err) => Some(err),
            AppErrorKind::Form(err) => Some(err),
            AppErrorKind::Render(err) => Some(err),
            AppErrorKind::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<T> for AppError
where
    AppErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        AppError {
            kind: AppErrorKind::from(value),
            message: None,
        }
    }
}

#[derive(Debug, Display, From)]
pub enum AppErrorKind {
    /// The request's query params were malformed or unexpected.
    #[display("{_0}")]
    Query(QueryRejection),
    /// The request's urlencoded body was malformed or unexpected.
    #[display("{_0}")]
    Form(FormRejection),
    /// The search input was rejected.
    #[display("{_0}")]
    Validation(ValidationError),
    /// The search found no cards.
    #[from(ignore)]
    #[display("Sorry, no cards matching your search for '{_0}' were found.")]
    NoResults(String),
    /// The page wasn't found.
    #[from(ignore)]
    #[display("Page not found.")]
    NotFound,
    /// A template failed to render.
    #[display("{_0}")]
    Render(minijinja::Error),
    /// A link could not be encoded.
    #[display("{_0}")]
    Encode(serde_urlencoded::ser::Error),
    /// A handler panicked.
    #[from(ignore)]
    #[display("handler panicked: {_0}")]
    Panic(String),
}

impl AppErrorKind {
    /// Checks if an error is internal.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppErrorKind::Render(_)
                | AppErrorKind::Encode(_)
                | AppErrorKind::Panic(_)
                | AppErrorKind::Form(FormRejection::BytesRejection(_))
        )
    }
}

impl From<SearchError> for AppErrorKind {
    fn from(value: SearchError) -> Self {
        match value {
            SearchError::Validation(err) => AppErrorKind::Validation(err),
            SearchError::NotFound { query } => AppErrorKind::NoResults(query),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(mut self) -> Response {
        let (status, mut message, internal_error) = match self.kind {
            AppErrorKind::Query(QueryRejection::FailedToDeserializeQueryString(_)) => (
                StatusCode::BAD_REQUEST,
                "The search parameters are invalid.".to_owned(),
                None,
            ),
            AppErrorKind::Form(FormRejection::FailedToDeserializeForm(_))
            | AppErrorKind::Form(FormRejection::FailedToDeserializeFormBody(_)) => (
                StatusCode::BAD_REQUEST,
                "The search form is invalid.".to_owned(),
                None,
            ),
            AppErrorKind::Form(FormRejection::InvalidFormContentType(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "No supported content type.".to_owned(),
                None,
            ),
            AppErrorKind::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            kind @ AppErrorKind::NoResults(_) => (StatusCode::NOT_FOUND, kind.to_string(), None),
            AppErrorKind::NotFound => (StatusCode::NOT_FOUND, "Page not found.".to_owned(), None),
            // create a generic internal error
            error_kind => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_ERROR_MESSAGE.to_owned(),
                Some(AppError {
                    kind: error_kind,
                    message: self.message.take(),
                }),
            ),
        };

        if let Some(override_message) = self.message {
            message = override_message;
        }

        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorPage { message });
        if let Some(error) = internal_error {
            response.extensions_mut().insert(Arc::new(error));
        }
        response
    }
}
