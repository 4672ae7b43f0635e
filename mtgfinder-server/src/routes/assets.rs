//! Static assets.

use axum::{
    body::Body,
    extract::Path,
    response::{IntoResponse, Response},
};

use http::header;

use rust_embed::RustEmbed;

use crate::app::{AppError, AppErrorKind};

#[derive(RustEmbed)]
#[folder = "static/"]
struct Asset;

/// Serves a file from `static/`.
pub async fn serve_asset(Path(path): Path<String>) -> Result<Response, AppError> {
    match Asset::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            Ok((
                [(header::CONTENT_TYPE, mime.as_ref())],
                Body::from(content.data),
            )
                .into_response())
        }
        None => Err(AppError::from(AppErrorKind::NotFound).with_message("No such asset.")),
    }
}
