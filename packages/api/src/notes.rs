//! # Notes service — ownership-scoped CRUD
//!
//! Every operation on a specific note goes through [`Notes::owned`], the one
//! place that decides whether a user may touch a note. It yields an
//! [`OwnedNote`], which cannot be built any other way, and the mutating
//! methods only accept that type. A missing slug and somebody else's note
//! both come back as [`Error::NotFound`], so callers cannot probe which
//! slugs exist.

use std::sync::Arc;

use store::{NewNote, Note, NoteStore, StoreError, UserId};

use crate::error::{Error, Result};
use crate::forms::{FormErrors, NoteForm, WARNING};

/// A note that has been checked to belong to the requesting user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedNote {
    note: Note,
}

impl OwnedNote {
    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn into_note(self) -> Note {
        self.note
    }
}

impl std::ops::Deref for OwnedNote {
    type Target = Note;

    fn deref(&self) -> &Note {
        &self.note
    }
}

/// Map a failed write. A slug collision is reported the same way the form
/// check does, and a note deleted since it was resolved is not found.
fn write_error(err: StoreError) -> Error {
    match err {
        StoreError::SlugTaken(slug) => {
            Error::Invalid(FormErrors::single("slug", format!("{slug}{WARNING}")))
        }
        StoreError::MissingNote(_) => Error::NotFound,
        other => Error::Store(other),
    }
}

#[derive(Clone)]
pub struct Notes {
    store: Arc<dyn NoteStore>,
}

impl Notes {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn NoteStore {
        self.store.as_ref()
    }

    /// Notes written by `user`. Nobody else's notes are ever included.
    pub async fn list(&self, user: UserId) -> Result<Vec<Note>> {
        Ok(self.store.list_by_author(user).await?)
    }

    /// Resolve `slug` for `user`, or [`Error::NotFound`] if the note is
    /// missing or written by someone else.
    pub async fn owned(&self, user: UserId, slug: &str) -> Result<OwnedNote> {
        match self.store.find_by_slug(slug).await? {
            Some(note) if note.is_owned_by(user) => Ok(OwnedNote { note }),
            _ => Err(Error::NotFound),
        }
    }

    /// Create a note owned by `author`.
    pub async fn create(&self, author: UserId, form: &NoteForm) -> Result<Note> {
        let changes = form.clean(self.store(), None).await?;
        let note = self
            .store
            .insert(NewNote {
                title: changes.title,
                text: changes.text,
                slug: changes.slug,
                author,
            })
            .await
            .map_err(write_error)?;
        tracing::info!(slug = %note.slug, author = %author, "note created");
        Ok(note)
    }

    /// Replace title, text and slug of an owned note. The author is kept.
    pub async fn update(&self, owned: &OwnedNote, form: &NoteForm) -> Result<Note> {
        let changes = form.clean(self.store(), Some(owned.id)).await?;
        let note = self
            .store
            .update(owned.id, changes)
            .await
            .map_err(write_error)?;
        tracing::info!(slug = %note.slug, author = %note.author, "note updated");
        Ok(note)
    }

    pub async fn edit(&self, user: UserId, slug: &str, form: &NoteForm) -> Result<Note> {
        let owned = self.owned(user, slug).await?;
        self.update(&owned, form).await
    }

    pub async fn remove(&self, owned: OwnedNote) -> Result<()> {
        let note = owned.into_note();
        if !self.store.delete(note.id).await? {
            return Err(Error::NotFound);
        }
        tracing::info!(slug = %note.slug, author = %note.author, "note deleted");
        Ok(())
    }

    pub async fn delete(&self, user: UserId, slug: &str) -> Result<()> {
        let owned = self.owned(user, slug).await?;
        self.remove(owned).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;
    use uuid::Uuid;

    struct Fixture {
        notes: Notes,
        store: MemoryStore,
        author: UserId,
        reader: UserId,
        note: Note,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let notes = Notes::new(Arc::new(store.clone()));
        let author = Uuid::new_v4();
        let reader = Uuid::new_v4();
        let note = notes
            .create(author, &NoteForm::new("Заголовок", "Текст заметки", "note-slug"))
            .await
            .unwrap();
        Fixture {
            notes,
            store,
            author,
            reader,
            note,
        }
    }

    fn edited() -> NoteForm {
        NoteForm::new("Новый заголовок", "Новый текст", "new-slug")
    }

    #[tokio::test]
    async fn test_list_contains_only_own_notes() {
        let f = fixture().await;

        assert_eq!(f.notes.list(f.author).await.unwrap(), vec![f.note.clone()]);
        assert!(f.notes.list(f.reader).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owned_hides_other_users_notes() {
        let f = fixture().await;

        let owned = f.notes.owned(f.author, "note-slug").await.unwrap();
        assert_eq!(owned.note(), &f.note);
        assert!(matches!(
            f.notes.owned(f.reader, "note-slug").await,
            Err(Error::NotFound)
        ));
        assert!(matches!(
            f.notes.owned(f.author, "no-such-slug").await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_author_can_edit_note() {
        let f = fixture().await;

        let note = f.notes.edit(f.author, "note-slug", &edited()).await.unwrap();
        assert_eq!(note.id, f.note.id);
        assert_eq!(note.title, "Новый заголовок");
        assert_eq!(note.text, "Новый текст");
        assert_eq!(note.slug, "new-slug");
        assert_eq!(note.author, f.author);
    }

    #[tokio::test]
    async fn test_reader_cant_edit_note() {
        let f = fixture().await;

        let err = f.notes.edit(f.reader, "note-slug", &edited()).await;
        assert!(matches!(err, Err(Error::NotFound)));
        let stored = f.store.find_by_slug("note-slug").await.unwrap();
        assert_eq!(stored, Some(f.note));
    }

    #[tokio::test]
    async fn test_author_can_delete_note() {
        let f = fixture().await;

        f.notes.delete(f.author, "note-slug").await.unwrap();
        assert_eq!(f.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reader_cant_delete_note() {
        let f = fixture().await;

        assert!(matches!(
            f.notes.delete(f.reader, "note-slug").await,
            Err(Error::NotFound)
        ));
        assert_eq!(f.store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_with_taken_slug_keeps_count() {
        let f = fixture().await;

        let err = f
            .notes
            .create(f.reader, &NoteForm::new("Другая", "Текст", "note-slug"))
            .await
            .unwrap_err();
        assert_eq!(
            err.form_errors().unwrap().get("slug"),
            [format!("note-slug{WARNING}")]
        );
        assert_eq!(f.store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_level_collision_maps_to_warning() {
        let err = write_error(StoreError::SlugTaken("raced".to_string()));
        assert_eq!(
            err.form_errors().unwrap().get("slug"),
            [format!("raced{WARNING}")]
        );
    }

    #[tokio::test]
    async fn test_update_of_deleted_note_is_not_found() {
        let f = fixture().await;
        let owned = f.notes.owned(f.author, "note-slug").await.unwrap();
        f.store.delete(owned.id).await.unwrap();

        let err = f.notes.update(&owned, &edited()).await;
        assert!(matches!(err, Err(Error::NotFound)), "{err:?}");
        assert_eq!(f.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_with_taken_slug_keeps_note() {
        let f = fixture().await;
        f.notes
            .create(f.author, &NoteForm::new("Другая", "Текст", "other-slug"))
            .await
            .unwrap();

        let form = NoteForm::new("Новый заголовок", "Новый текст", "other-slug");
        let err = f.notes.edit(f.author, "note-slug", &form).await.unwrap_err();
        assert_eq!(
            err.form_errors().unwrap().get("slug"),
            [format!("other-slug{WARNING}")]
        );
        let stored = f.store.find_by_slug("note-slug").await.unwrap();
        assert_eq!(stored, Some(f.note));
    }
}
