// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use plazas::LedgerState;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::backend;
use crate::error::PersistenceError;
use crate::mutations;
use crate::queries;
use crate::store::ClaimsStore;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID so tests
/// never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A claims store backed by a `SQLite` database.
pub struct SqliteStore {
    conn: SqliteConnection,
    description: String,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Creates a store with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_claims_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn,
            description: format!("sqlite:memory#{db_id}"),
        })
    }

    /// Opens (creating if needed) a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        info!(path = path_str, "Opened SQLite claims store");

        Ok(Self {
            conn,
            description: format!("sqlite:{path_str}"),
        })
    }
}

impl ClaimsStore for SqliteStore {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn load(&mut self) -> Result<LedgerState, PersistenceError> {
        queries::claims::load_state(&mut self.conn)
    }

    fn save(&mut self, state: &LedgerState) -> Result<(), PersistenceError> {
        mutations::claims::replace_state(&mut self.conn, state)
    }
}
