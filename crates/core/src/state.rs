// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas_domain::{
    AvailabilityRow, ClaimRecord, EventState, PositionKey, PositionRecord, derive,
};
use std::collections::BTreeMap;

/// Everything the claims store persists.
///
/// Totals are not part of the state: they come from the catalog and are
/// joined in at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    /// Claimed counts keyed by position. Absent keys mean nothing claimed.
    pub claims: BTreeMap<PositionKey, ClaimRecord>,
    /// Event day and last update time.
    pub event: EventState,
}

impl LedgerState {
    /// Creates a new state.
    #[must_use]
    pub const fn new(claims: BTreeMap<PositionKey, ClaimRecord>, event: EventState) -> Self {
        Self { claims, event }
    }

    /// Returns the claim for a position, defaulting to zero.
    #[must_use]
    pub fn claim(&self, key: &PositionKey) -> ClaimRecord {
        self.claims.get(key).copied().unwrap_or_default()
    }

    /// Derives availability rows for the given catalog.
    #[must_use]
    pub fn rows(&self, catalog: &[PositionRecord]) -> Vec<AvailabilityRow> {
        derive(catalog, &self.claims)
    }
}

/// What a successful transition changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// A claim was recorded; carries the position's updated availability.
    ClaimRecorded(AvailabilityRow),
    /// The event day changed.
    EventDayChanged {
        /// The day before the transition.
        previous: u32,
        /// The day after the transition.
        current: u32,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: LedgerState,
    /// What changed.
    pub outcome: TransitionOutcome,
}
