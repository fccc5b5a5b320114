use api::{FormErrors, NoteForm};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use store::User;

use crate::error::AppError;
use crate::extract::{AuthorNote, CurrentUser, MaybeUser};
use crate::render;
use crate::routes::{self, Route};
use crate::AppState;

const ADD_HEADING: &str = "Добавить заметку";
const EDIT_HEADING: &str = "Редактировать заметку";

/// Outcome of a create/edit submission: back to `success`, or the same form
/// again with its errors.
fn form_outcome<T>(
    result: api::Result<T>,
    user: &User,
    heading: &str,
    action: &str,
    form: &NoteForm,
) -> Result<Response, AppError> {
    match result {
        Ok(_) => Ok(routes::redirect(&Route::Success.path())),
        Err(api::Error::Invalid(errors)) => {
            Ok(Html(render::note_form(user, heading, action, form, &errors)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn home(MaybeUser(user): MaybeUser) -> Html<String> {
    Html(render::home(user.as_ref()))
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let notes = state.notes.list(user.id).await?;
    Ok(Html(render::note_list(&user, &notes)))
}

pub async fn success(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(render::success(&user))
}

pub async fn add_page(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(render::note_form(
        &user,
        ADD_HEADING,
        &Route::Add.path(),
        &NoteForm::default(),
        &FormErrors::new(),
    ))
}

pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    let result = state.notes.create(user.id, &form).await;
    form_outcome(result, &user, ADD_HEADING, &Route::Add.path(), &form)
}

pub async fn detail(AuthorNote { user, note }: AuthorNote) -> Html<String> {
    Html(render::note_detail(&user, &note))
}

pub async fn edit_page(AuthorNote { user, note }: AuthorNote) -> Html<String> {
    let form = NoteForm::new(&note.title, &note.text, &note.slug);
    Html(render::note_form(
        &user,
        EDIT_HEADING,
        &Route::Edit(&note.slug).path(),
        &form,
        &FormErrors::new(),
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    AuthorNote { user, note }: AuthorNote,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    let result = state.notes.update(&note, &form).await;
    form_outcome(result, &user, EDIT_HEADING, &Route::Edit(&note.slug).path(), &form)
}

pub async fn delete_page(AuthorNote { user, note }: AuthorNote) -> Html<String> {
    Html(render::delete_confirm(&user, &note))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthorNote { note, .. }: AuthorNote,
) -> Result<Response, AppError> {
    state.notes.remove(note).await?;
    Ok(routes::redirect(&Route::Success.path()))
}
