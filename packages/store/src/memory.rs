use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteChanges, User, UserId};
use crate::repo::{NoteStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct Tables {
    notes: Vec<Note>,
    users: Vec<User>,
}

/// In-memory store for tests and local development.
///
/// Every operation holds one lock for its whole duration, so the slug check
/// and the write that follows it cannot interleave with another request.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

fn slug_in_use(notes: &[Note], slug: &str, except: Option<Uuid>) -> bool {
    notes
        .iter()
        .any(|n| n.slug == slug && Some(n.id) != except)
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError> {
        Ok(self.lock()?.notes.iter().find(|n| n.slug == slug).cloned())
    }

    async fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, StoreError> {
        Ok(self
            .lock()?
            .notes
            .iter()
            .filter(|n| n.is_owned_by(author))
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &str, except: Option<Uuid>) -> Result<bool, StoreError> {
        Ok(slug_in_use(&self.lock()?.notes, slug, except))
    }

    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        let mut tables = self.lock()?;
        if slug_in_use(&tables.notes, &note.slug, None) {
            return Err(StoreError::SlugTaken(note.slug));
        }
        let note = note.into_note();
        tables.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> Result<Note, StoreError> {
        let mut tables = self.lock()?;
        if slug_in_use(&tables.notes, &changes.slug, Some(id)) {
            return Err(StoreError::SlugTaken(changes.slug));
        }
        let note = tables
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::MissingNote(id))?;
        note.title = changes.title;
        note.text = changes.text;
        note.slug = changes.slug;
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.notes.len();
        tables.notes.retain(|n| n.id != id);
        Ok(tables.notes.len() != before)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.notes.len())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.lock()?;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken(user.username));
        }
        let user = user.into_user();
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(slug: &str, author: UserId) -> NewNote {
        NewNote {
            title: "Заголовок".to_string(),
            text: "Текст заметки".to_string(),
            slug: slug.to_string(),
            author,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();

        assert_eq!(store.count().await.unwrap(), 0);
        let note = store.insert(new_note("note-slug", author)).await.unwrap();

        let found = store.find_by_slug("note-slug").await.unwrap().unwrap();
        assert_eq!(found, note);
        assert!(store.find_by_slug("missing").await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_slug() {
        let store = MemoryStore::new();
        store.insert(new_note("note-slug", Uuid::new_v4())).await.unwrap();

        let err = store
            .insert(new_note("note-slug", Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken(ref s) if s == "note-slug"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_by_author_filters_other_users() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();
        let reader = Uuid::new_v4();
        store.insert(new_note("first", author)).await.unwrap();
        store.insert(new_note("second", reader)).await.unwrap();

        let notes = store.list_by_author(author).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].slug, "first");
    }

    #[tokio::test]
    async fn test_update_keeps_author_and_allows_own_slug() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();
        let note = store.insert(new_note("note-slug", author)).await.unwrap();
        store.insert(new_note("other", author)).await.unwrap();

        let changes = NoteChanges {
            title: "Новый заголовок".to_string(),
            text: "Новый текст".to_string(),
            slug: "note-slug".to_string(),
        };
        let updated = store.update(note.id, changes.clone()).await.unwrap();
        assert_eq!(updated.title, "Новый заголовок");
        assert_eq!(updated.author, author);

        let clash = NoteChanges {
            slug: "other".to_string(),
            ..changes
        };
        assert!(matches!(
            store.update(note.id, clash).await,
            Err(StoreError::SlugTaken(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_note() {
        let store = MemoryStore::new();
        let note = store.insert(new_note("note-slug", Uuid::new_v4())).await.unwrap();

        assert!(store.delete(note.id).await.unwrap());
        assert!(!store.delete(note.id).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_usernames_are_unique() {
        let store = MemoryStore::new();
        let user = NewUser {
            username: "author".to_string(),
            password_hash: "hash".to_string(),
        };
        let created = store.create_user(user.clone()).await.unwrap();

        assert!(matches!(
            store.create_user(user).await,
            Err(StoreError::UsernameTaken(_))
        ));
        assert_eq!(
            store.find_user_by_username("author").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(store.find_user(created.id).await.unwrap(), Some(created));
    }
}
