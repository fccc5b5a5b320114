//! # Domain models for notes and their authors
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Note`] | A persisted note. The `slug` is unique across every note and `author` is fixed at creation. |
//! | [`NewNote`] | Everything needed to insert a note. The slug is already resolved (derived from the title if the form left it blank). |
//! | [`NoteChanges`] | The editable subset of a note. It has no author field, so an edit can never reassign ownership. |
//! | [`User`] | A local account. Only the PHC-format password hash is stored. |
//! | [`NewUser`] | Input for creating an account. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a user; notes reference their author through it.
pub type UserId = Uuid;

/// A note owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// URL-safe identifier, unique across all notes: "note-slug"
    pub slug: String,
    pub author: UserId,
}

impl Note {
    /// True when `user` is the author of this note.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }
}

/// A note about to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: UserId,
}

impl NewNote {
    pub(crate) fn into_note(self) -> Note {
        Note {
            id: Uuid::new_v4(),
            title: self.title,
            text: self.text,
            slug: self.slug,
            author: self.author,
        }
    }
}

/// Fields an author may change on an existing note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// An account about to be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub(crate) fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}
