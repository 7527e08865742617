// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use plazas::LedgerState;
use tracing::debug;

use crate::diesel_schema::{claims, event_state};
use crate::error::PersistenceError;

fn to_column(value: u32, field: &str) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::WriteFailed(format!("{field} {value} is too large")))
}

/// Replaces the stored state with `state` in a single transaction.
///
/// Claims not present in `state` are removed so the table mirrors it exactly.
///
/// # Errors
///
/// Returns an error if any statement fails; the transaction is rolled back.
pub fn replace_state(
    conn: &mut SqliteConnection,
    state: &LedgerState,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(claims::table).execute(conn)?;

        for (key, claim) in &state.claims {
            diesel::insert_into(claims::table)
                .values((
                    claims::zone.eq(key.zone.name()),
                    claims::specialty.eq(key.specialty.name()),
                    claims::permanent_claimed
                        .eq(to_column(claim.permanent_claimed, "permanent_claimed")?),
                    claims::interim_claimed
                        .eq(to_column(claim.interim_claimed, "interim_claimed")?),
                ))
                .execute(conn)?;
        }

        diesel::update(event_state::table)
            .filter(event_state::event_state_id.eq(1))
            .set((
                event_state::event_day.eq(to_column(state.event.event_day, "event_day")?),
                event_state::last_updated
                    .eq(state.event.last_updated.as_ref().map(|ts| ts.as_str())),
            ))
            .execute(conn)?;

        debug!(claims = state.claims.len(), "Replaced stored claims");
        Ok(())
    })
}
