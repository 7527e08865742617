// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use plazas_domain::{AvailabilityRow, GlobalSummary, QuotaFilter, RowFilter, Zone, ZoneSummary};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, translate_domain_error};

/// API request to open an admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The shared admin secret.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Token to send back as `Authorization: Bearer <token>`.
    pub session_token: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// A success message.
    pub message: String,
}

/// API request to record the claimed counts of one position.
///
/// Counts are signed so that negative input reaches validation and is
/// rejected with a field-specific message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordClaimRequest {
    /// The zone label.
    pub zone: String,
    /// The specialty label.
    pub specialty: String,
    /// New permanent claimed count.
    pub permanent_claimed: i64,
    /// New interim claimed count.
    pub interim_claimed: i64,
}

/// API response for a recorded claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordClaimResponse {
    /// The position's availability after the write.
    pub position: AvailabilityRow,
    /// The timestamp stored with the write.
    pub last_updated: Option<String>,
    /// A success message.
    pub message: String,
}

/// API response for a claim preview; nothing is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewClaimResponse {
    /// The availability the claim would leave.
    pub position: AvailabilityRow,
}

/// API request to change the event day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEventDayRequest {
    /// The new day.
    pub day: i64,
}

/// API response for a changed event day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEventDayResponse {
    /// The day before the change.
    pub previous_day: u32,
    /// The day after the change.
    pub event_day: u32,
    /// A success message.
    pub message: String,
}

/// API response for the dashboard header and KPIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Current event day.
    pub event_day: u32,
    /// Highest day the event can reach.
    pub max_event_day: u32,
    /// When a claim was last recorded, if ever.
    pub last_updated: Option<String>,
    /// Totals across every position.
    pub summary: GlobalSummary,
    /// Number of zones in the catalog.
    pub zones_total: usize,
    /// Number of zones with anything left.
    pub zones_available: usize,
    /// Number of positions whose stored claim exceeds the current total.
    pub over_claimed_positions: usize,
}

/// Query string for position listings and exports.
///
/// `zones` is a comma-separated list; `kind` is `both`, `permanent` or
/// `interim`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionsQuery {
    /// Zones to keep. Empty keeps every zone.
    #[serde(default)]
    pub zones: Option<String>,
    /// Keep only rows with something left. Defaults to true.
    #[serde(default)]
    pub only_available: Option<bool>,
    /// Quota kind filter.
    #[serde(default)]
    pub kind: Option<String>,
    /// Sort by zone, then specialty.
    #[serde(default)]
    pub sorted: Option<bool>,
}

impl PositionsQuery {
    /// Converts the query into a row filter.
    ///
    /// # Errors
    ///
    /// Returns an error if a zone label or the kind is invalid.
    pub fn to_filter(&self) -> Result<RowFilter, ApiError> {
        let zones: Vec<Zone> = self
            .zones
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Zone::new(name).map_err(translate_domain_error))
            .collect::<Result<Vec<Zone>, ApiError>>()?;

        let quota: QuotaFilter = self
            .kind
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(translate_domain_error)?;

        Ok(RowFilter {
            zones,
            only_available: self.only_available.unwrap_or(true),
            quota,
            sorted: self.sorted.unwrap_or(false),
        })
    }
}

/// API response for a position listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionsResponse {
    /// Number of positions returned.
    pub count: usize,
    /// The selected positions.
    pub positions: Vec<AvailabilityRow>,
}

/// API response for the per-zone overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonesResponse {
    /// Zone summaries in zone name order.
    pub zones: Vec<ZoneSummary>,
    /// Sum of all zone summaries.
    pub summary: GlobalSummary,
}

/// API response for a catalog refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshCatalogResponse {
    /// Number of positions in the reloaded catalog.
    pub positions: usize,
    /// A success message.
    pub message: String,
}
