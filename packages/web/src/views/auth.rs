use api::auth::{self as accounts, LoginForm, SignupForm};
use api::FormErrors;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::render;
use crate::routes::{self, Route};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NextParam {
    pub next: Option<String>,
}

pub async fn login_page(Query(params): Query<NextParam>) -> Html<String> {
    Html(render::login(params.next.as_deref(), "", &FormErrors::new()))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<NextParam>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.accounts.authenticate(&form).await {
        Ok(user) => {
            accounts::log_in(&session, &user).await?;
            tracing::info!(username = %user.username, "user logged in");
            Ok(routes::redirect(&routes::safe_next(params.next.as_deref())))
        }
        Err(api::Error::Invalid(errors)) => Ok(Html(render::login(
            params.next.as_deref(),
            &form.username,
            &errors,
        ))
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn logout(session: Session) -> Result<Html<String>, AppError> {
    accounts::log_out(&session).await?;
    Ok(Html(render::logged_out()))
}

pub async fn signup_page() -> Html<String> {
    Html(render::signup("", &FormErrors::new()))
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    match state.accounts.signup(&form).await {
        Ok(_) => Ok(routes::redirect(&Route::Login.path())),
        Err(api::Error::Invalid(errors)) => {
            Ok(Html(render::signup(&form.username, &errors)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
