//! # Named routes
//!
//! Every page has a name ([`Route`]) and an axum path pattern. Handlers and
//! templates never spell out a path themselves; they call [`Route::path`],
//! so a pattern only ever changes here.
//!
//! | Route | Pattern | Access |
//! |-------|---------|--------|
//! | `Home` | `/` | public |
//! | `List` | `/notes/` | logged in |
//! | `Success` | `/done/` | logged in |
//! | `Add` | `/add/` | logged in |
//! | `Detail` | `/note/{slug}/` | author |
//! | `Edit` | `/edit/{slug}/` | author |
//! | `Delete` | `/delete/{slug}/` | author |
//! | `Login` | `/auth/login/` | public |
//! | `Logout` | `/auth/logout/` | public |
//! | `Signup` | `/auth/signup/` | public |

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

pub const HOME: &str = "/";
pub const LIST: &str = "/notes/";
pub const SUCCESS: &str = "/done/";
pub const ADD: &str = "/add/";
pub const DETAIL: &str = "/note/{slug}/";
pub const EDIT: &str = "/edit/{slug}/";
pub const DELETE: &str = "/delete/{slug}/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const SIGNUP: &str = "/auth/signup/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Home,
    List,
    Success,
    Add,
    Detail(&'a str),
    Edit(&'a str),
    Delete(&'a str),
    Login,
    Logout,
    Signup,
}

impl Route<'_> {
    /// Concrete path of this route, e.g. `/note/note-slug/`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME.to_string(),
            Route::List => LIST.to_string(),
            Route::Success => SUCCESS.to_string(),
            Route::Add => ADD.to_string(),
            Route::Detail(slug) => DETAIL.replace("{slug}", slug),
            Route::Edit(slug) => EDIT.replace("{slug}", slug),
            Route::Delete(slug) => DELETE.replace("{slug}", slug),
            Route::Login => LOGIN.to_string(),
            Route::Logout => LOGOUT.to_string(),
            Route::Signup => SIGNUP.to_string(),
        }
    }
}

/// Percent-encode a return path for use as the `next` query value. Slashes
/// stay literal so `/add/` round-trips as `next=/add/`.
pub fn encode_next(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Login page URL that sends the user back to `next` afterwards.
pub fn login_url(next: &str) -> String {
    format!("{}?next={}", Route::Login.path(), encode_next(next))
}

/// Only local absolute paths are followed after login; anything else falls
/// back to the home page.
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\") => {
            next.to_string()
        }
        _ => Route::Home.path(),
    }
}

/// `302 Found` to `location`.
pub fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Detail("note-slug").path(), "/note/note-slug/");
        assert_eq!(Route::Edit("note-slug").path(), "/edit/note-slug/");
        assert_eq!(Route::Delete("note-slug").path(), "/delete/note-slug/");
    }

    #[test]
    fn test_login_url_keeps_slashes() {
        assert_eq!(login_url("/add/"), "/auth/login/?next=/add/");
        assert_eq!(
            login_url("/notes/?page=2"),
            "/auth/login/?next=/notes/%3Fpage%3D2"
        );
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/notes/")), "/notes/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
