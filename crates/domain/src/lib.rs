// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod filter;
mod ledger;
mod summary;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use filter::{QuotaFilter, RowFilter, filter_rows};
pub use ledger::{AvailabilityRow, derive};
pub use summary::{
    GlobalSummary, Totals, ZoneStatus, ZoneSummary, aggregate_by_zone, aggregate_global,
    sum_zone_summaries,
};
pub use types::{
    ClaimRecord, EventDayBounds, EventState, EventTimestamp, KEY_SEPARATOR, PositionKey,
    PositionRecord, QuotaKind, Specialty, TIMESTAMP_FORMAT, Zone,
};
pub use validation::{
    find_position, validate_claim, validate_event_day, validate_unique_positions,
};
