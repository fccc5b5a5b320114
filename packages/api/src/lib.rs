//! # API crate — server logic shared by every notes surface
//!
//! This crate holds everything the HTTP layer needs that is not HTTP: form
//! validation, the ownership rule, account handling and configuration.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Local password accounts, Argon2id hashing, session keys |
//! | [`db`] | `server` | PostgreSQL connection pool and the [`db::PgStore`] backend |
//! | [`error`] | — | The crate-wide [`Error`] type |
//! | [`forms`] | — | [`NoteForm`] cleaning, slug derivation and the uniqueness warning |
//! | [`notes`] | — | The [`Notes`] service and the [`OwnedNote`] proof of ownership |
//! | [`settings`] | — | Layered configuration (defaults, `config.toml`, environment) |

pub mod auth;
pub mod db;
pub mod error;
pub mod forms;
pub mod notes;
pub mod settings;

pub use error::{Error, Result};
pub use forms::{FormErrors, NoteForm, WARNING};
pub use notes::{Notes, OwnedNote};
pub use settings::Settings;
