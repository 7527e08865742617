// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability derivation.
//!
//! Availability is never stored. It is recomputed from the catalog totals and
//! the claimed counts on every read, so the only persisted numbers are the
//! totals (external) and the claims (recorded here).

use crate::types::{ClaimRecord, PositionKey, PositionRecord, Specialty, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Availability of a single position, derived from its catalog record and claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRow {
    /// The zone.
    pub zone: Zone,
    /// The specialty.
    pub specialty: Specialty,
    /// Permanent quota.
    pub permanent_total: u32,
    /// Permanent positions claimed.
    pub permanent_claimed: u32,
    /// Permanent positions still available.
    pub permanent_available: u32,
    /// Interim quota.
    pub interim_total: u32,
    /// Interim positions claimed.
    pub interim_claimed: u32,
    /// Interim positions still available.
    pub interim_available: u32,
    /// Sum of both available counts.
    pub total_available: u64,
    /// Sum of both claimed counts.
    pub total_claimed: u64,
}

impl AvailabilityRow {
    /// Derives the availability of one position.
    ///
    /// A claim larger than its total can only come from a catalog reload that
    /// lowered a quota; availability saturates at zero in that case and the
    /// stored claim is left as-is.
    #[must_use]
    pub fn from_parts(record: &PositionRecord, claim: ClaimRecord) -> Self {
        let permanent_available: u32 = record
            .permanent_total
            .saturating_sub(claim.permanent_claimed);
        let interim_available: u32 = record.interim_total.saturating_sub(claim.interim_claimed);

        Self {
            zone: record.zone.clone(),
            specialty: record.specialty.clone(),
            permanent_total: record.permanent_total,
            permanent_claimed: claim.permanent_claimed,
            permanent_available,
            interim_total: record.interim_total,
            interim_claimed: claim.interim_claimed,
            interim_available,
            total_available: u64::from(permanent_available) + u64::from(interim_available),
            total_claimed: u64::from(claim.permanent_claimed) + u64::from(claim.interim_claimed),
        }
    }

    /// Returns the identity of the row.
    #[must_use]
    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.zone.clone(), self.specialty.clone())
    }

    /// Total quota across both categories.
    ///
    /// Sums are widened so two `u32` quotas never overflow.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.permanent_total) + u64::from(self.interim_total)
    }

    /// Returns true if any position remains available.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.total_available > 0
    }

    /// Returns true if a stored claim exceeds its current catalog total.
    #[must_use]
    pub const fn is_over_claimed(&self) -> bool {
        self.permanent_claimed > self.permanent_total || self.interim_claimed > self.interim_total
    }
}

/// Joins the catalog with the claims.
///
/// Output follows catalog order; positions without a claim record count as
/// zero claimed.
///
/// # Arguments
///
/// * `catalog` - The loaded position records
/// * `claims` - Claimed counts keyed by position
#[must_use]
pub fn derive(
    catalog: &[PositionRecord],
    claims: &BTreeMap<PositionKey, ClaimRecord>,
) -> Vec<AvailabilityRow> {
    catalog
        .iter()
        .map(|record| {
            let claim: ClaimRecord = claims.get(&record.key()).copied().unwrap_or_default();
            AvailabilityRow::from_parts(record, claim)
        })
        .collect()
}
