use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::render;

/// Handler error: [`api::Error`] rendered as an HTTP response.
#[derive(Debug)]
pub struct AppError(pub api::Error);

impl From<api::Error> for AppError {
    fn from(err: api::Error) -> Self {
        Self(err)
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found())).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            api::Error::NotFound => not_found(),
            api::Error::Invalid(errors) => {
                tracing::warn!(?errors, "unhandled form errors");
                (StatusCode::BAD_REQUEST, Html(render::server_error())).into_response()
            }
            err => {
                tracing::error!("request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(render::server_error())).into_response()
            }
        }
    }
}
