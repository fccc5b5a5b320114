//! # Database module — PostgreSQL persistence
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so that tests and tools
//! that only need [`store::MemoryStore`] never pull in SQLx.
//!
//! - [`get_pool`] — a lazy, process-wide pool singleton backed by a
//!   [`tokio::sync::OnceCell`]; the first caller's URL wins.
//! - [`PgStore`] — [`store::NoteStore`] and [`store::UserStore`] over that
//!   pool. Slug and username uniqueness are enforced by `UNIQUE` constraints
//!   and unique violations are reported as the matching [`store::StoreError`].
//!
//! Schema migrations live in `packages/api/migrations` and are embedded by
//! the `web` binary with `sqlx::migrate!`.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
mod postgres;

#[cfg(feature = "server")]
pub use pool::get_pool;
#[cfg(feature = "server")]
pub use postgres::PgStore;
