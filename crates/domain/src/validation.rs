// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{ClaimRecord, EventDayBounds, PositionKey, PositionRecord, QuotaKind};
use std::collections::HashSet;

/// Finds the catalog record for a position.
///
/// # Errors
///
/// Returns `DomainError::PositionNotFound` if no record matches the key.
pub fn find_position<'a>(
    catalog: &'a [PositionRecord],
    key: &PositionKey,
) -> Result<&'a PositionRecord, DomainError> {
    catalog
        .iter()
        .find(|record| record.matches(key))
        .ok_or_else(|| DomainError::PositionNotFound(key.clone()))
}

/// Checks one claimed value against its category total.
fn validate_claimed_value(
    record: &PositionRecord,
    kind: QuotaKind,
    claimed: i64,
) -> Result<u32, DomainError> {
    if claimed < 0 {
        return Err(DomainError::NegativeClaim {
            kind,
            value: claimed,
        });
    }

    let total: u32 = record.total(kind);
    match u32::try_from(claimed) {
        Ok(value) if value <= total => Ok(value),
        _ => Err(DomainError::ClaimExceedsTotal {
            kind,
            claimed,
            total,
        }),
    }
}

/// Validates a proposed claim against its catalog record.
///
/// Out-of-range values are rejected, never clamped. Permanent is checked
/// before interim so the first violated field is the one reported.
///
/// # Arguments
///
/// * `record` - The catalog record the claim applies to
/// * `permanent_claimed` - Proposed permanent claimed count
/// * `interim_claimed` - Proposed interim claimed count
///
/// # Errors
///
/// Returns an error if:
/// - Either value is negative
/// - Either value exceeds the total for its category
pub fn validate_claim(
    record: &PositionRecord,
    permanent_claimed: i64,
    interim_claimed: i64,
) -> Result<ClaimRecord, DomainError> {
    let permanent: u32 = validate_claimed_value(record, QuotaKind::Permanent, permanent_claimed)?;
    let interim: u32 = validate_claimed_value(record, QuotaKind::Interim, interim_claimed)?;
    Ok(ClaimRecord::new(permanent, interim))
}

/// Validates an event day against the configured bounds.
///
/// # Errors
///
/// Returns `DomainError::EventDayOutOfRange` unless `1 <= day <= max_event_day`.
pub fn validate_event_day(day: i64, bounds: EventDayBounds) -> Result<u32, DomainError> {
    match u32::try_from(day) {
        Ok(value) if (1..=bounds.max_event_day).contains(&value) => Ok(value),
        _ => Err(DomainError::EventDayOutOfRange {
            day,
            max: bounds.max_event_day,
        }),
    }
}

/// Validates that every `(zone, specialty)` pair appears once in a catalog.
///
/// # Errors
///
/// Returns `DomainError::DuplicatePosition` for the first repeated key.
pub fn validate_unique_positions(catalog: &[PositionRecord]) -> Result<(), DomainError> {
    let mut seen: HashSet<PositionKey> = HashSet::with_capacity(catalog.len());
    for record in catalog {
        let key: PositionKey = record.key();
        if seen.contains(&key) {
            return Err(DomainError::DuplicatePosition(key));
        }
        seen.insert(key);
    }
    Ok(())
}
