pub mod auth;
pub mod notes;

use axum::response::Response;

pub async fn fallback() -> Response {
    crate::error::not_found()
}
