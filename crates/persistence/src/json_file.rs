// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Claims kept in a single JSON document.
//!
//! Saves go to a sibling temporary file which is synced and then renamed over
//! the target, so readers see either the old document or the new one.

use plazas::LedgerState;
use std::fs::{File, rename};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::data_models::ClaimsDocument;
use crate::error::PersistenceError;
use crate::store::ClaimsStore;

/// A claims store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `path`. The file is not touched until used.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty document if none exists yet.
    ///
    /// Returns `true` if a file was created. Loading never creates the file
    /// implicitly, so a missing store stays an error until this is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn initialize(&self) -> Result<bool, PersistenceError> {
        if self.path.exists() {
            debug!(path = %self.path.display(), "Claims document already exists");
            return Ok(false);
        }

        self.write_document(&ClaimsDocument::default())?;
        info!(path = %self.path.display(), "Created empty claims document");
        Ok(true)
    }

    /// Sibling file a save writes before renaming it over the document.
    ///
    /// Named per process so two servers sharing a document never write into
    /// the same temp file.
    pub(crate) fn temp_path(&self) -> PathBuf {
        let file_name: String = self
            .path
            .file_name()
            .map_or_else(|| String::from("claims.json"), |n| n.to_string_lossy().into_owned());
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", std::process::id()))
    }

    fn write_document(&self, document: &ClaimsDocument) -> Result<(), PersistenceError> {
        let body: String = serde_json::to_string_pretty(document)?;
        let tmp_path: PathBuf = self.temp_path();

        let write = || -> std::io::Result<()> {
            let mut file: File = File::create(&tmp_path)?;
            file.write_all(body.as_bytes())?;
            file.sync_all()?;
            rename(&tmp_path, &self.path)
        };

        write().map_err(|e| {
            // Best effort; the target itself was never opened
            let _ = std::fs::remove_file(&tmp_path);
            PersistenceError::WriteFailed(format!("{}: {e}", self.path.display()))
        })
    }
}

impl ClaimsStore for JsonFileStore {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn load(&mut self) -> Result<LedgerState, PersistenceError> {
        let body: String = std::fs::read_to_string(&self.path).map_err(|e| {
            let reason: String = if e.kind() == ErrorKind::NotFound {
                String::from("file does not exist")
            } else {
                e.to_string()
            };
            PersistenceError::StoreUnavailable(format!("{}: {reason}", self.path.display()))
        })?;

        let document: ClaimsDocument = serde_json::from_str(&body).map_err(|e| {
            PersistenceError::StoreUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        let state: LedgerState = document.into_state()?;
        debug!(
            path = %self.path.display(),
            claims = state.claims.len(),
            event_day = state.event.event_day,
            "Loaded claims document"
        );
        Ok(state)
    }

    fn save(&mut self, state: &LedgerState) -> Result<(), PersistenceError> {
        self.write_document(&ClaimsDocument::from_state(state))?;
        debug!(
            path = %self.path.display(),
            claims = state.claims.len(),
            "Saved claims document"
        );
        Ok(())
    }
}
