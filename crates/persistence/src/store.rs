// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas::LedgerState;

use crate::error::PersistenceError;

/// Durable home of the claimed counts and the event state.
///
/// The store is the serialization point between writers: whatever `save`
/// lands last wins. No merging or locking happens here.
pub trait ClaimsStore: Send {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    /// Reads the full state.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StoreUnavailable` if the backing store is
    /// missing or malformed.
    fn load(&mut self) -> Result<LedgerState, PersistenceError>;

    /// Replaces the full state.
    ///
    /// Either everything is written or nothing is.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the previous content is intact.
    fn save(&mut self, state: &LedgerState) -> Result<(), PersistenceError>;
}
