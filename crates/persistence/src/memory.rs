// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas::LedgerState;
use tracing::debug;

use crate::error::PersistenceError;
use crate::store::ClaimsStore;

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: LedgerState,
    saves: usize,
}

impl InMemoryStore {
    /// Creates an empty store (day 1, nothing claimed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `state`.
    #[must_use]
    pub const fn with_state(state: LedgerState) -> Self {
        Self { state, saves: 0 }
    }

    /// Number of successful saves so far.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl ClaimsStore for InMemoryStore {
    fn describe(&self) -> String {
        String::from("memory")
    }

    fn load(&mut self) -> Result<LedgerState, PersistenceError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &LedgerState) -> Result<(), PersistenceError> {
        self.state = state.clone();
        self.saves += 1;
        debug!(claims = state.claims.len(), "Saved in-memory claims");
        Ok(())
    }
}
