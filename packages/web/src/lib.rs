//! HTTP surface of the notes service: routing, sessions and pages.

use std::sync::Arc;

use api::auth::Accounts;
use api::Notes;
use axum::routing::get;
use axum::Router;
use store::{MemoryStore, NoteStore, UserStore};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub mod error;
pub mod extract;
pub mod render;
pub mod routes;
mod views;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub notes: Notes,
    pub accounts: Accounts,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            notes: Notes::new(notes),
            accounts: Accounts::new(users),
        }
    }

    /// Both services backed by one in-memory store.
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store)
    }
}

/// All routes, without the session layer.
pub fn router(state: AppState) -> Router {
    use views::{auth, notes};

    Router::new()
        .route(routes::HOME, get(notes::home))
        .route(routes::LIST, get(notes::list))
        .route(routes::SUCCESS, get(notes::success))
        .route(routes::ADD, get(notes::add_page).post(notes::add))
        .route(routes::DETAIL, get(notes::detail))
        .route(routes::EDIT, get(notes::edit_page).post(notes::edit))
        .route(routes::DELETE, get(notes::delete_page).post(notes::delete))
        .route(routes::LOGIN, get(auth::login_page).post(auth::login))
        .route(routes::LOGOUT, get(auth::logout).post(auth::logout))
        .route(routes::SIGNUP, get(auth::signup_page).post(auth::signup))
        .fallback(views::fallback)
        .with_state(state)
}

/// Cookie session layer over `store`, configured from settings.
pub fn session_layer<S>(store: S, settings: &api::settings::Session) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(settings.days)))
}

/// The complete application: routes, sessions and request tracing.
pub fn app<S>(state: AppState, session_store: S, settings: &api::settings::Session) -> Router
where
    S: SessionStore + Clone,
{
    router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer(session_store, settings)),
    )
}
