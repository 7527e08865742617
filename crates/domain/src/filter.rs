// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ledger::AvailabilityRow;
use crate::types::Zone;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which quota category a view is interested in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaFilter {
    /// Rows are kept regardless of category.
    #[default]
    Both,
    /// Only rows with permanent positions available.
    Permanent,
    /// Only rows with interim positions available.
    Interim,
}

impl FromStr for QuotaFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "both" => Ok(Self::Both),
            "permanent" => Ok(Self::Permanent),
            "interim" => Ok(Self::Interim),
            other => Err(DomainError::InvalidQuotaFilter(other.to_string())),
        }
    }
}

/// Display-side selection over derived rows.
///
/// Filtering and ordering are view policy; the ledger itself always returns
/// rows in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    /// Zones to keep. Empty keeps every zone.
    pub zones: Vec<Zone>,
    /// Drop rows with nothing left to claim.
    pub only_available: bool,
    /// Category restriction.
    pub quota: QuotaFilter,
    /// Sort the result by zone, then specialty.
    pub sorted: bool,
}

impl RowFilter {
    /// Returns true if the row passes every criterion.
    #[must_use]
    pub fn accepts(&self, row: &AvailabilityRow) -> bool {
        if !self.zones.is_empty() && !self.zones.contains(&row.zone) {
            return false;
        }
        if self.only_available && !row.is_available() {
            return false;
        }
        match self.quota {
            QuotaFilter::Both => true,
            QuotaFilter::Permanent => row.permanent_available > 0,
            QuotaFilter::Interim => row.interim_available > 0,
        }
    }
}

/// Applies a view filter to derived rows.
#[must_use]
pub fn filter_rows(rows: &[AvailabilityRow], filter: &RowFilter) -> Vec<AvailabilityRow> {
    let mut selected: Vec<AvailabilityRow> = rows
        .iter()
        .filter(|row| filter.accepts(row))
        .cloned()
        .collect();

    if filter.sorted {
        selected.sort_by(|a, b| {
            a.zone
                .cmp(&b.zone)
                .then_with(|| a.specialty.cmp(&b.specialty))
        });
    }

    selected
}
