//! # Persistence traits for notes and users
//!
//! All reads and writes of the application go through [`NoteStore`] and
//! [`UserStore`], so the same handlers run against the in-memory
//! [`crate::MemoryStore`] in tests and against PostgreSQL in production.
//!
//! Uniqueness is enforced by the store itself: [`NoteStore::insert`] and
//! [`NoteStore::update`] check the slug and write in one atomic step and
//! report a collision as [`StoreError::SlugTaken`]. A caller that validated
//! the slug beforehand can still lose a race against a concurrent request;
//! this error is how it finds out.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteChanges, User, UserId};

/// Errors reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("slug `{0}` is already used by another note")]
    SlugTaken(String),
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),
    #[error("note {0} does not exist")]
    MissingNote(Uuid),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Look a note up by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError>;

    /// All notes written by `author`, oldest first.
    async fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, StoreError>;

    /// Whether a note other than `except` already uses `slug`.
    async fn slug_exists(&self, slug: &str, except: Option<Uuid>) -> Result<bool, StoreError>;

    /// Insert a note, failing with [`StoreError::SlugTaken`] on collision.
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError>;

    /// Apply `changes` to note `id`. The author is left untouched.
    async fn update(&self, id: Uuid, changes: NoteChanges) -> Result<Note, StoreError>;

    /// Remove note `id`. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create an account, failing with [`StoreError::UsernameTaken`] on collision.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}
