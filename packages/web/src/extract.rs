//! # Request extractors — who is asking, and may they see this note
//!
//! | Extractor | Yields | Rejection |
//! |-----------|--------|-----------|
//! | [`MaybeUser`] | the logged-in user, if any | only on session failure |
//! | [`CurrentUser`] | the logged-in user | `302` to the login page with `next` set to the requested path |
//! | [`AuthorNote`] | the user and the `{slug}` note, checked with [`api::Notes::owned`] | as `CurrentUser`, then `404` for a missing or foreign note |
//!
//! Handlers of slug routes take an [`AuthorNote`] and nothing else gives
//! them a note, so the ownership rule is applied the same way everywhere.

use api::OwnedNote;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use store::User;
use tower_sessions::Session;

use crate::error::AppError;
use crate::routes;
use crate::AppState;

async fn session_user(parts: &mut Parts, state: &AppState) -> Result<Option<User>, Response> {
    let session = Session::from_request_parts(parts, state)
        .await
        .map_err(IntoResponse::into_response)?;
    let Some(id) = api::auth::current_user_id(&session)
        .await
        .map_err(|e| AppError(e).into_response())?
    else {
        return Ok(None);
    };
    state
        .accounts
        .find(id)
        .await
        .map_err(|e| AppError(e).into_response())
}

/// The logged-in user, or `None` for anonymous visitors.
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_user(parts, state).await?))
    }
}

/// The logged-in user. Anonymous requests are sent to the login page.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(routes::redirect(&routes::login_url(next)))
            }
        }
    }
}

/// The note named by the `{slug}` path segment, owned by the current user.
pub struct AuthorNote {
    pub user: User,
    pub note: OwnedNote,
}

impl FromRequestParts<AppState> for AuthorNote {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        let Path(slug) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let note = state
            .notes
            .owned(user.id, &slug)
            .await
            .map_err(|e| AppError(e).into_response())?;
        Ok(AuthorNote { user, note })
    }
}
