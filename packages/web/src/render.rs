//! # HTML pages
//!
//! Plain string rendering; every page is wrapped in [`layout`]. Add and edit
//! pages always contain a `<form>`, and field errors are rendered as
//! `<ul class="errorlist" data-field="...">` right above their input.

use api::{FormErrors, NoteForm};
use store::{Note, User};

use crate::routes::{encode_next, Route};

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn nav(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            r#"<nav><a href="{home}">Главная</a> <a href="{list}">Мои заметки</a> <a href="{add}">Добавить заметку</a> <span>{name}</span> <a href="{logout}">Выйти</a></nav>"#,
            home = Route::Home.path(),
            list = Route::List.path(),
            add = Route::Add.path(),
            name = html_escape(&user.username),
            logout = Route::Logout.path(),
        ),
        None => format!(
            r#"<nav><a href="{home}">Главная</a> <a href="{login}">Войти</a> <a href="{signup}">Регистрация</a></nav>"#,
            home = Route::Home.path(),
            login = Route::Login.path(),
            signup = Route::Signup.path(),
        ),
    }
}

pub fn layout(title: &str, user: Option<&User>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{nav}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = html_escape(title),
        nav = nav(user),
    )
}

fn error_list(errors: &FormErrors, field: &str) -> String {
    let messages = errors.get(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", html_escape(m)))
        .collect();
    format!(r#"<ul class="errorlist" data-field="{field}">{items}</ul>"#)
}

fn text_input(label: &str, name: &str, input_type: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        r#"<p>{errors}<label for="id_{name}">{label}</label> <input type="{input_type}" name="{name}" id="id_{name}" value="{value}"></p>"#,
        errors = error_list(errors, name),
        value = html_escape(value),
    )
}

pub fn home(user: Option<&User>) -> String {
    let body = match user {
        Some(_) => format!(
            r#"<h1>Заметки</h1><p><a href="{}">Перейти к списку заметок</a></p>"#,
            Route::List.path()
        ),
        None => format!(
            r#"<h1>Заметки</h1><p>Чтобы вести заметки, <a href="{}">войдите</a> или <a href="{}">зарегистрируйтесь</a>.</p>"#,
            Route::Login.path(),
            Route::Signup.path()
        ),
    };
    layout("Заметки", user, &body)
}

pub fn note_list(user: &User, notes: &[Note]) -> String {
    let body = if notes.is_empty() {
        "<h1>Мои заметки</h1><p>Заметок пока нет.</p>".to_string()
    } else {
        let items: String = notes
            .iter()
            .map(|note| {
                format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    Route::Detail(&note.slug).path(),
                    html_escape(&note.title)
                )
            })
            .collect();
        format!(r#"<h1>Мои заметки</h1><ul class="object-list">{items}</ul>"#)
    };
    layout("Мои заметки", Some(user), &body)
}

pub fn note_detail(user: &User, note: &Note) -> String {
    let body = format!(
        r#"<article><h1>{title}</h1><p>{text}</p></article><p><a href="{edit}">Редактировать</a> <a href="{delete}">Удалить</a></p>"#,
        title = html_escape(&note.title),
        text = html_escape(&note.text),
        edit = Route::Edit(&note.slug).path(),
        delete = Route::Delete(&note.slug).path(),
    );
    layout(&note.title, Some(user), &body)
}

/// The add/edit form, pre-filled with `form` and annotated with `errors`.
pub fn note_form(user: &User, heading: &str, action: &str, form: &NoteForm, errors: &FormErrors) -> String {
    let body = format!(
        r#"<h1>{heading}</h1><form method="post" action="{action}">{title}<p>{text_errors}<label for="id_text">Текст</label> <textarea name="text" id="id_text">{text}</textarea></p>{slug}<button type="submit">Сохранить</button></form>"#,
        heading = html_escape(heading),
        action = html_escape(action),
        title = text_input("Заголовок", "title", "text", &form.title, errors),
        text_errors = error_list(errors, "text"),
        text = html_escape(&form.text),
        slug = text_input("Адрес для страницы с заметкой", "slug", "text", &form.slug, errors),
    );
    layout(heading, Some(user), &body)
}

pub fn delete_confirm(user: &User, note: &Note) -> String {
    let body = format!(
        r#"<h1>Удалить заметку «{title}»?</h1><form method="post" action="{action}"><button type="submit">Удалить</button></form>"#,
        title = html_escape(&note.title),
        action = Route::Delete(&note.slug).path(),
    );
    layout("Удаление заметки", Some(user), &body)
}

pub fn success(user: &User) -> String {
    let body = format!(
        r#"<h1>Успешно!</h1><p><a href="{}">Вернуться к списку заметок</a></p>"#,
        Route::List.path()
    );
    layout("Успешно", Some(user), &body)
}

pub fn login(next: Option<&str>, username: &str, errors: &FormErrors) -> String {
    let action = match next {
        Some(next) => format!("{}?next={}", Route::Login.path(), encode_next(next)),
        None => Route::Login.path(),
    };
    let body = format!(
        r#"<h1>Вход</h1><form method="post" action="{action}">{all}{username}{password}<button type="submit">Войти</button></form>"#,
        action = html_escape(&action),
        all = error_list(errors, api::forms::NON_FIELD),
        username = text_input("Имя пользователя", "username", "text", username, errors),
        password = text_input("Пароль", "password", "password", "", errors),
    );
    layout("Вход", None, &body)
}

pub fn signup(username: &str, errors: &FormErrors) -> String {
    let body = format!(
        r#"<h1>Регистрация</h1><form method="post" action="{action}">{username}{password1}{password2}<button type="submit">Зарегистрироваться</button></form>"#,
        action = Route::Signup.path(),
        username = text_input("Имя пользователя", "username", "text", username, errors),
        password1 = text_input("Пароль", "password1", "password", "", errors),
        password2 = text_input("Подтверждение пароля", "password2", "password", "", errors),
    );
    layout("Регистрация", None, &body)
}

pub fn logged_out() -> String {
    let body = format!(
        r#"<h1>Вы вышли из своей учётной записи.</h1><p><a href="{}">Войти снова</a></p>"#,
        Route::Login.path()
    );
    layout("Выход", None, &body)
}

pub fn not_found() -> String {
    layout("Страница не найдена", None, "<h1>Страница не найдена</h1>")
}

pub fn server_error() -> String {
    layout("Ошибка сервера", None, "<h1>Ошибка сервера</h1>")
}
