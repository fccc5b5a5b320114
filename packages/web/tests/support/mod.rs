//! Test harness: the full router over in-memory note and session stores.

#![allow(dead_code)]

use std::sync::OnceLock;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use store::{MemoryStore, NewNote, NewUser, Note, NoteStore, User, UserStore};
use tower::ServiceExt;
use web::AppState;

pub const PASSWORD: &str = "s3cret-pass";

/// Every test user shares one password, so it is hashed only once.
fn password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| api::auth::hash_password(PASSWORD).unwrap())
        .clone()
}

pub struct TestApp {
    router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let router = web::app(
            AppState::in_memory(store.clone()),
            tower_sessions::MemoryStore::default(),
            &api::Settings::default().session,
        );
        Self { router, store }
    }

    pub async fn user(&self, username: &str) -> User {
        self.store
            .create_user(NewUser {
                username: username.to_string(),
                password_hash: password_hash(),
            })
            .await
            .unwrap()
    }

    /// The note every test starts from, written by `author`.
    pub async fn note(&self, author: &User) -> Note {
        self.store
            .insert(NewNote {
                title: "Заголовок".to_string(),
                text: "Текст заметки".to_string(),
                slug: "note-slug".to_string(),
                author: author.id,
            })
            .await
            .unwrap()
    }

    pub async fn count(&self) -> usize {
        self.store.count().await.unwrap()
    }

    pub fn anonymous(&self) -> Client<'_> {
        Client {
            app: self,
            cookie: None,
        }
    }

    /// A client logged in as `user` through the login page.
    pub async fn login(&self, user: &User) -> Client<'_> {
        let response = self
            .anonymous()
            .post(
                "/auth/login/",
                &[("username", user.username.as_str()), ("password", PASSWORD)],
            )
            .await;
        assert_eq!(response.status(), StatusCode::FOUND, "login failed");
        let cookie = session_cookie(&response).expect("login did not set a session cookie");
        Client {
            app: self,
            cookie: Some(cookie),
        }
    }

    /// A client carrying the session cookie `response` set.
    pub fn client_from(&self, response: &Response) -> Client<'_> {
        Client {
            app: self,
            cookie: session_cookie(response),
        }
    }
}

fn session_cookie(response: &Response) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(str::to_string)
}

pub struct Client<'a> {
    app: &'a TestApp,
    cookie: Option<String>,
}

impl Client<'_> {
    async fn send(&self, builder: axum::http::request::Builder, body: Body) -> Response {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };
        self.app
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, path: &str) -> Response {
        self.send(Request::get(path), Body::empty()).await
    }

    pub async fn post(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        let body = serde_urlencoded::to_string(fields).unwrap();
        let builder = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(body)).await
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn assert_redirects(response: &Response, expected: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok());
    assert_eq!(location, Some(expected));
}

/// Login URL an anonymous request to `path` is sent to.
pub fn login_redirect(path: &str) -> String {
    format!("/auth/login/?next={path}")
}
