use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use store::{NewNote, NewUser, Note, NoteChanges, NoteStore, StoreError, User, UserId, UserStore};
use uuid::Uuid;

/// PostgreSQL-backed store.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NoteRow {
    id: Uuid,
    title: String,
    text: String,
    slug: String,
    author_id: Uuid,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            title: row.title,
            text: row.text,
            slug: row.slug,
            author: row.author_id,
        }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

const NOTE_COLUMNS: &str = "id, title, text, slug, author_id";

#[async_trait]
impl NoteStore for PgStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError> {
        let row: Option<NoteRow> =
            sqlx::query_as(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;
        Ok(row.map(Note::from))
    }

    async fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, StoreError> {
        let rows: Vec<NoteRow> = sqlx::query_as(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE author_id = $1 ORDER BY created_at, id"
        ))
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn slug_exists(&self, slug: &str, except: Option<Uuid>) -> Result<bool, StoreError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM notes WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(except)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;
        Ok(exists.0)
    }

    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        let row: NoteRow = sqlx::query_as(&format!(
            "INSERT INTO notes (id, title, text, slug, author_id) VALUES ($1, $2, $3, $4, $5) \
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(note.author)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::SlugTaken(note.slug.clone())
            } else {
                backend(err)
            }
        })?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> Result<Note, StoreError> {
        let row: Option<NoteRow> = sqlx::query_as(&format!(
            "UPDATE notes SET title = $2, text = $3, slug = $4 WHERE id = $1 \
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.text)
        .bind(&changes.slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::SlugTaken(changes.slug.clone())
            } else {
                backend(err)
            }
        })?;
        row.map(Note::from).ok_or(StoreError::MissingNote(id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(count.0 as usize)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::UsernameTaken(user.username.clone())
            } else {
                backend(err)
            }
        })?;
        Ok(row.into())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(User::from))
    }
}
