// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas::LedgerState;
use plazas_domain::{ClaimRecord, EventState, EventTimestamp, PositionKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PersistenceError;

/// On-disk layout of the JSON claims document.
///
/// ```json
/// { "event_day": 2, "last_updated": "19/10/2026 09:15:00",
///   "claims": { "Norte||Cardiología": { "permanent_claimed": 2, "interim_claimed": 1 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsDocument {
    #[serde(default = "default_event_day")]
    pub event_day: u32,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub claims: BTreeMap<String, ClaimRecord>,
}

const fn default_event_day() -> u32 {
    1
}

impl Default for ClaimsDocument {
    fn default() -> Self {
        Self::from_state(&LedgerState::default())
    }
}

impl ClaimsDocument {
    /// Flattens a ledger state into the stored layout.
    #[must_use]
    pub fn from_state(state: &LedgerState) -> Self {
        Self {
            event_day: state.event.event_day,
            last_updated: state
                .event
                .last_updated
                .as_ref()
                .map(|ts| ts.as_str().to_string()),
            claims: state
                .claims
                .iter()
                .map(|(key, claim)| (key.to_string(), *claim))
                .collect(),
        }
    }

    /// Rebuilds the ledger state, rejecting malformed keys and days.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StoreUnavailable` if a key cannot be split
    /// into zone and specialty or the event day is zero.
    pub fn into_state(self) -> Result<LedgerState, PersistenceError> {
        if self.event_day == 0 {
            return Err(PersistenceError::StoreUnavailable(String::from(
                "event_day must be at least 1",
            )));
        }

        let mut claims: BTreeMap<PositionKey, ClaimRecord> = BTreeMap::new();
        for (raw_key, claim) in self.claims {
            let key: PositionKey = raw_key
                .parse()
                .map_err(|e| PersistenceError::StoreUnavailable(format!("{e}")))?;
            claims.insert(key, claim);
        }

        Ok(LedgerState::new(
            claims,
            EventState::new(
                self.event_day,
                self.last_updated.map(EventTimestamp::from_stored),
            ),
        ))
    }
}
