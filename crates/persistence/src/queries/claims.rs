// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use plazas::LedgerState;
use plazas_domain::{ClaimRecord, EventState, EventTimestamp, PositionKey};
use std::collections::BTreeMap;

use crate::diesel_schema::{claims, event_state};
use crate::error::PersistenceError;

/// Diesel Queryable struct for claim rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = claims)]
struct ClaimRow {
    zone: String,
    specialty: String,
    permanent_claimed: i32,
    interim_claimed: i32,
}

/// Diesel Queryable struct for the event state row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = event_state)]
struct EventStateRow {
    event_day: i32,
    last_updated: Option<String>,
}

fn to_count(value: i32, field: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::StoreUnavailable(format!("{field} is negative in stored claims"))
    })
}

/// Reads every claim and the event state.
///
/// # Errors
///
/// Returns `PersistenceError::StoreUnavailable` if the event state row is
/// missing or a stored value is out of range.
pub fn load_state(conn: &mut SqliteConnection) -> Result<LedgerState, PersistenceError> {
    let rows: Vec<ClaimRow> = claims::table.select(ClaimRow::as_select()).load(conn)?;

    let mut claimed: BTreeMap<PositionKey, ClaimRecord> = BTreeMap::new();
    for row in rows {
        let key: PositionKey = PositionKey::from_labels(&row.zone, &row.specialty)
            .map_err(|e| PersistenceError::StoreUnavailable(e.to_string()))?;
        let claim: ClaimRecord = ClaimRecord::new(
            to_count(row.permanent_claimed, "permanent_claimed")?,
            to_count(row.interim_claimed, "interim_claimed")?,
        );
        claimed.insert(key, claim);
    }

    let event: EventStateRow = event_state::table
        .filter(event_state::event_state_id.eq(1))
        .select(EventStateRow::as_select())
        .first(conn)?;

    let event_day: u32 = event
        .event_day
        .to_u32()
        .filter(|day| *day >= 1)
        .ok_or_else(|| {
            PersistenceError::StoreUnavailable(format!(
                "stored event_day {} is invalid",
                event.event_day
            ))
        })?;

    Ok(LedgerState::new(
        claimed,
        EventState::new(event_day, event.last_updated.map(EventTimestamp::from_stored)),
    ))
}
