//! # Note form — cleaning and validation of submitted note fields
//!
//! [`NoteForm`] is what the add and edit pages submit. [`NoteForm::clean`]
//! turns it into [`NoteChanges`] ready for the store, or collects every
//! problem into [`FormErrors`] keyed by field name:
//!
//! - `title` — required, at most 100 characters.
//! - `text` — required.
//! - `slug` — optional. A blank slug is derived from the title with
//!   [`store::slugify_truncated`]. An explicit slug must match
//!   `[-a-zA-Z0-9_]+`. Either way it must not be used by another note; a
//!   collision is reported as `"<slug>"` followed by [`WARNING`].
//!
//! Leading and trailing whitespace is stripped from every field first.

use std::collections::BTreeMap;

use serde::Deserialize;
use store::{slugify_truncated, NoteChanges, NoteStore, MAX_SLUG_LEN};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Suffix appended to a slug that is already taken.
pub const WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

pub const MAX_TITLE_LEN: usize = 100;

pub(crate) const REQUIRED: &str = "Обязательное поле.";

/// Key under which errors not tied to one field are stored.
pub const NON_FIELD: &str = "__all__";

/// Validation errors grouped by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Errors on `field`, empty when it is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// `Ok(())` when nothing was reported, otherwise [`Error::Invalid`].
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(self))
        }
    }
}

/// Submitted fields of the add/edit note form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
}

fn is_valid_slug(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl NoteForm {
    pub fn new(title: &str, text: &str, slug: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            slug: slug.to_string(),
        }
    }

    /// Validate the form. `instance` is the note being edited, whose own
    /// slug does not count as a collision.
    pub async fn clean(
        &self,
        notes: &dyn NoteStore,
        instance: Option<Uuid>,
    ) -> Result<NoteChanges> {
        let mut errors = FormErrors::new();
        let title = self.title.trim();
        let text = self.text.trim();
        let slug = self.slug.trim();

        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("Убедитесь, что это значение содержит не более {MAX_TITLE_LEN} символов."),
            );
        }
        if text.is_empty() {
            errors.add("text", REQUIRED);
        }

        let slug = if slug.is_empty() {
            let derived = slugify_truncated(title);
            if derived.is_empty() && !title.is_empty() {
                errors.add(
                    "slug",
                    "Не удалось составить slug из заголовка, укажите его вручную.",
                );
            }
            derived
        } else {
            if slug.chars().count() > MAX_SLUG_LEN {
                errors.add(
                    "slug",
                    format!("Убедитесь, что это значение содержит не более {MAX_SLUG_LEN} символов."),
                );
            } else if !is_valid_slug(slug) {
                errors.add(
                    "slug",
                    "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.",
                );
            }
            slug.to_string()
        };

        if !slug.is_empty() && !errors.has("slug") && notes.slug_exists(&slug, instance).await? {
            errors.add("slug", format!("{slug}{WARNING}"));
        }

        errors.into_result()?;
        Ok(NoteChanges {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }
}
