//! What the list and form pages show.

mod support;

use axum::http::StatusCode;
use support::{body_text, TestApp};

#[tokio::test]
async fn test_note_in_list_for_author() {
    let app = TestApp::new();
    let author = app.user("Автор заметки").await;
    let reader = app.user("Читатель").await;
    let note = app.note(&author).await;
    let link = format!(r#"<a href="/note/{}/">{}</a>"#, note.slug, note.title);

    for (user, note_in_list) in [(&author, true), (&reader, false)] {
        let client = app.login(user).await;
        let response = client.get("/notes/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert_eq!(body.contains(&link), note_in_list, "{}", user.username);
    }
}

#[tokio::test]
async fn test_create_note_page_contains_form() {
    let app = TestApp::new();
    let author = app.user("Автор заметки").await;
    let note = app.note(&author).await;
    let client = app.login(&author).await;

    for url in ["/add/".to_string(), format!("/edit/{}/", note.slug)] {
        let response = client.get(&url).await;
        assert_eq!(response.status(), StatusCode::OK, "{url}");
        let body = body_text(response).await;
        assert!(body.contains(r#"<form method="post""#), "{url}");
    }
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let app = TestApp::new();
    let author = app.user("Автор заметки").await;
    let note = app.note(&author).await;
    let client = app.login(&author).await;

    let body = body_text(client.get(&format!("/edit/{}/", note.slug)).await).await;
    assert!(body.contains(&format!(r#"value="{}""#, note.title)));
    assert!(body.contains(&format!(r#"value="{}""#, note.slug)));
    assert!(body.contains(&format!(">{}</textarea>", note.text)));
}

#[tokio::test]
async fn test_detail_shows_note() {
    let app = TestApp::new();
    let author = app.user("Автор заметки").await;
    let note = app.note(&author).await;
    let client = app.login(&author).await;

    let body = body_text(client.get(&format!("/note/{}/", note.slug)).await).await;
    assert!(body.contains(&note.title));
    assert!(body.contains(&note.text));
}
