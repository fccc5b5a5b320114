//! Session helpers: who is logged in.

use store::{User, UserId};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::Result;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Bind `user` to the session. The session id is rotated first so a
/// pre-login id cannot be reused.
pub async fn log_in(session: &Session, user: &User) -> Result<()> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user.id.to_string())
        .await?;
    Ok(())
}

/// Drop everything stored in the session.
pub async fn log_out(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}

/// The logged-in user's id, if any. A value that no longer parses is treated
/// as logged out.
pub async fn current_user_id(session: &Session) -> Result<Option<UserId>> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    Ok(user_id.and_then(|id| Uuid::parse_str(&id).ok()))
}
