// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ledger::AvailabilityRow;
use crate::types::Zone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a zone still has any position available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    /// At least one position remains.
    Available,
    /// Every position has been claimed.
    Exhausted,
}

impl ZoneStatus {
    /// Derives the status from the available count.
    #[must_use]
    pub const fn from_available(total_available: u64) -> Self {
        if total_available > 0 {
            Self::Available
        } else {
            Self::Exhausted
        }
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Exhausted => "exhausted",
        }
    }
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running sums shared by zone and global summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub permanent_total: u64,
    pub permanent_claimed: u64,
    pub permanent_available: u64,
    pub interim_total: u64,
    pub interim_claimed: u64,
    pub interim_available: u64,
    pub total: u64,
    pub total_claimed: u64,
    pub total_available: u64,
    /// Number of rows with at least one position available.
    pub specialties_available: u64,
}

impl Totals {
    fn add_row(&mut self, row: &AvailabilityRow) {
        self.permanent_total += u64::from(row.permanent_total);
        self.permanent_claimed += u64::from(row.permanent_claimed);
        self.permanent_available += u64::from(row.permanent_available);
        self.interim_total += u64::from(row.interim_total);
        self.interim_claimed += u64::from(row.interim_claimed);
        self.interim_available += u64::from(row.interim_available);
        self.total += row.total();
        self.total_claimed += row.total_claimed;
        self.total_available += row.total_available;
        if row.is_available() {
            self.specialties_available += 1;
        }
    }

    fn add(&mut self, other: &Self) {
        self.permanent_total += other.permanent_total;
        self.permanent_claimed += other.permanent_claimed;
        self.permanent_available += other.permanent_available;
        self.interim_total += other.interim_total;
        self.interim_claimed += other.interim_claimed;
        self.interim_available += other.interim_available;
        self.total += other.total;
        self.total_claimed += other.total_claimed;
        self.total_available += other.total_available;
        self.specialties_available += other.specialties_available;
    }
}

/// Aggregated availability for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// The zone.
    pub zone: Zone,
    /// Sums across the zone's rows.
    #[serde(flatten)]
    pub totals: Totals,
    /// `Available` if any position remains in the zone.
    pub status: ZoneStatus,
}

/// Aggregated availability across the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSummary {
    /// Sums across every row.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Sums availability per zone.
///
/// Zones are keyed in name order.
#[must_use]
pub fn aggregate_by_zone(rows: &[AvailabilityRow]) -> BTreeMap<Zone, ZoneSummary> {
    let mut totals_by_zone: BTreeMap<Zone, Totals> = BTreeMap::new();
    for row in rows {
        totals_by_zone
            .entry(row.zone.clone())
            .or_default()
            .add_row(row);
    }

    totals_by_zone
        .into_iter()
        .map(|(zone, totals)| {
            let summary: ZoneSummary = ZoneSummary {
                zone: zone.clone(),
                totals,
                status: ZoneStatus::from_available(totals.total_available),
            };
            (zone, summary)
        })
        .collect()
}

/// Sums availability across all rows.
#[must_use]
pub fn aggregate_global(rows: &[AvailabilityRow]) -> GlobalSummary {
    let mut totals: Totals = Totals::default();
    for row in rows {
        totals.add_row(row);
    }
    GlobalSummary { totals }
}

/// Sums a set of zone summaries into a global summary.
#[must_use]
pub fn sum_zone_summaries<'a>(zones: impl IntoIterator<Item = &'a ZoneSummary>) -> GlobalSummary {
    let mut totals: Totals = Totals::default();
    for zone in zones {
        totals.add(&zone.totals);
    }
    GlobalSummary { totals }
}
