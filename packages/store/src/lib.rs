pub mod models;
pub mod repo;
pub mod slug;

mod memory;
pub use memory::MemoryStore;

pub use models::{NewNote, NewUser, Note, NoteChanges, User, UserId};
pub use repo::{NoteStore, StoreError, UserStore};
pub use slug::{slugify, slugify_truncated, MAX_SLUG_LEN};
