// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{LedgerState, TransitionOutcome, TransitionResult};
use plazas_domain::{
    AvailabilityRow, ClaimRecord, EventDayBounds, EventTimestamp, PositionKey, PositionRecord,
    find_position, validate_claim, validate_event_day,
};

/// Applies a command to the current state, producing a new state.
///
/// The input state is never modified. On error nothing changes and the caller
/// must not persist anything.
///
/// # Arguments
///
/// * `catalog` - The loaded catalog (source of the totals)
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `now` - Timestamp stamped on recorded claims
/// * `bounds` - Event-day limits
///
/// # Errors
///
/// Returns an error if:
/// - The position does not exist in the catalog
/// - A claimed value is negative or exceeds its total
/// - The event day is outside `1..=bounds.max_event_day`
pub fn apply(
    catalog: &[PositionRecord],
    state: &LedgerState,
    command: Command,
    now: EventTimestamp,
    bounds: EventDayBounds,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::RecordClaim {
            key,
            permanent_claimed,
            interim_claimed,
        } => {
            let record: &PositionRecord = find_position(catalog, &key)?;
            let claim: ClaimRecord = validate_claim(record, permanent_claimed, interim_claimed)?;

            // Claim and timestamp travel together in the same new state
            let mut new_state: LedgerState = state.clone();
            new_state.claims.insert(key, claim);
            new_state.event.last_updated = Some(now);

            Ok(TransitionResult {
                new_state,
                outcome: TransitionOutcome::ClaimRecorded(AvailabilityRow::from_parts(
                    record, claim,
                )),
            })
        }
        Command::SetEventDay { day } => {
            let current: u32 = validate_event_day(day, bounds)?;

            let mut new_state: LedgerState = state.clone();
            new_state.event.event_day = current;

            Ok(TransitionResult {
                new_state,
                outcome: TransitionOutcome::EventDayChanged {
                    previous: state.event.event_day,
                    current,
                },
            })
        }
    }
}

/// Computes the availability a claim would leave, without changing anything.
///
/// Validation is identical to `Command::RecordClaim`, so a preview that
/// succeeds is guaranteed to be accepted by `apply`.
///
/// # Errors
///
/// Returns the same errors as recording the claim would.
pub fn preview_claim(
    catalog: &[PositionRecord],
    key: &PositionKey,
    permanent_claimed: i64,
    interim_claimed: i64,
) -> Result<AvailabilityRow, CoreError> {
    let record: &PositionRecord = find_position(catalog, key)?;
    let claim: ClaimRecord = validate_claim(record, permanent_claimed, interim_claimed)?;
    Ok(AvailabilityRow::from_parts(record, claim))
}
