// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Claims store backends for the Plazas Monitor.
//!
//! The store holds only what operators record: claimed counts per position
//! plus the event day and last update time. Totals come from the catalog and
//! availability is always derived, never stored.
//!
//! ## Backends
//!
//! - **JSON file** ([`JsonFileStore`]): one document, replaced atomically
//!   on every save.
//! - **`SQLite`** ([`SqliteStore`]): Diesel with embedded migrations; every
//!   save runs in a single transaction.
//! - **Memory** ([`InMemoryStore`]): for tests and throwaway runs.
//!
//! All backends implement [`ClaimsStore`]. Concurrent writers are not
//! coordinated: the last `save` to land wins.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod json_file;
mod memory;
mod mutations;
mod queries;
mod sqlite_store;
mod store;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use data_models::ClaimsDocument;
pub use error::PersistenceError;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use sqlite_store::SqliteStore;
pub use store::ClaimsStore;
