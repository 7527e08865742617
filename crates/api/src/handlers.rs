// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler works on an explicit catalog snapshot and claims store.
//! Reads derive availability from scratch; writes go through the core
//! `apply` function and are persisted with a single `save`, so a rejected
//! write never touches the store.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use plazas::{Command, LedgerState, TransitionOutcome, TransitionResult, apply, preview_claim};
use plazas_catalog::CatalogCache;
use plazas_domain::{
    AvailabilityRow, EventDayBounds, EventTimestamp, GlobalSummary, PositionKey, PositionRecord,
    RowFilter, Zone, ZoneSummary, aggregate_by_zone, aggregate_global, filter_rows,
    sum_zone_summaries,
};
use plazas_persistence::ClaimsStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{AdminGate, AuthenticationService, SessionRegistry};
use crate::error::{
    ApiError, translate_catalog_error, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::export::{CsvExport, build_export};
use crate::request_response::{
    DashboardResponse, LoginRequest, LoginResponse, LogoutResponse, PositionsQuery,
    PositionsResponse, PreviewClaimResponse, RecordClaimRequest, RecordClaimResponse,
    RefreshCatalogResponse, SetEventDayRequest, SetEventDayResponse, ZonesResponse,
};

/// Default timezone for timestamps and export names (Baja California).
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Tijuana;

/// Operator-facing settings shared by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Event-day limits.
    pub bounds: EventDayBounds,
    /// Timezone used to render timestamps.
    pub timezone: Tz,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            bounds: EventDayBounds::default(),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl LedgerSettings {
    /// Returns the current time in the configured timezone.
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Loads the claims store, translating failures.
///
/// # Errors
///
/// Returns `ApiError::StoreUnavailable` if the store cannot be read.
pub fn load_state(store: &mut dyn ClaimsStore) -> Result<LedgerState, ApiError> {
    store.load().map_err(|e| {
        warn!(store = %store.describe(), error = %e, "Claims store load failed");
        translate_persistence_error(e)
    })
}

/// Derives availability rows, logging positions whose claim exceeds the current total.
#[must_use]
pub fn derive_rows(catalog: &[PositionRecord], state: &LedgerState) -> Vec<AvailabilityRow> {
    let rows: Vec<AvailabilityRow> = state.rows(catalog);
    for row in rows.iter().filter(|row| row.is_over_claimed()) {
        warn!(
            zone = %row.zone,
            specialty = %row.specialty,
            permanent_claimed = row.permanent_claimed,
            permanent_total = row.permanent_total,
            interim_claimed = row.interim_claimed,
            interim_total = row.interim_total,
            "Stored claim exceeds catalog total; availability clamped to zero"
        );
    }
    rows
}

fn position_key(zone: &str, specialty: &str) -> Result<PositionKey, ApiError> {
    PositionKey::from_labels(zone, specialty).map_err(translate_domain_error)
}

/// Returns the dashboard header and global KPIs.
///
/// # Errors
///
/// Returns an error if the claims store cannot be read.
pub fn get_dashboard(
    catalog: &[PositionRecord],
    store: &mut dyn ClaimsStore,
    settings: &LedgerSettings,
) -> Result<DashboardResponse, ApiError> {
    let state: LedgerState = load_state(store)?;
    let rows: Vec<AvailabilityRow> = derive_rows(catalog, &state);
    let zones: BTreeMap<Zone, ZoneSummary> = aggregate_by_zone(&rows);
    let summary: GlobalSummary = aggregate_global(&rows);

    Ok(DashboardResponse {
        event_day: state.event.event_day,
        max_event_day: settings.bounds.max_event_day,
        last_updated: state.event.last_updated.map(|ts| ts.as_str().to_string()),
        summary,
        zones_total: zones.len(),
        zones_available: zones
            .values()
            .filter(|zone| zone.totals.total_available > 0)
            .count(),
        over_claimed_positions: rows.iter().filter(|row| row.is_over_claimed()).count(),
    })
}

/// Lists positions matching the query.
///
/// # Errors
///
/// Returns an error if the query is invalid or the claims store cannot be read.
pub fn list_positions(
    catalog: &[PositionRecord],
    store: &mut dyn ClaimsStore,
    query: &PositionsQuery,
) -> Result<PositionsResponse, ApiError> {
    let filter: RowFilter = query.to_filter()?;
    let state: LedgerState = load_state(store)?;
    let positions: Vec<AvailabilityRow> = filter_rows(&derive_rows(catalog, &state), &filter);

    Ok(PositionsResponse {
        count: positions.len(),
        positions,
    })
}

/// Lists per-zone summaries in zone name order.
///
/// # Errors
///
/// Returns an error if the claims store cannot be read.
pub fn list_zones(
    catalog: &[PositionRecord],
    store: &mut dyn ClaimsStore,
) -> Result<ZonesResponse, ApiError> {
    let state: LedgerState = load_state(store)?;
    let rows: Vec<AvailabilityRow> = derive_rows(catalog, &state);
    let zones: Vec<ZoneSummary> = aggregate_by_zone(&rows).into_values().collect();
    let summary: GlobalSummary = sum_zone_summaries(&zones);

    Ok(ZonesResponse { zones, summary })
}

/// Records the claimed counts of one position.
///
/// The claim and the new `last_updated` are written with one `save`.
///
/// # Errors
///
/// Returns an error if:
/// - The position does not exist in the catalog
/// - A count is negative or exceeds its total
/// - The claims store cannot be read or written
pub fn record_claim(
    catalog: &[PositionRecord],
    store: &mut dyn ClaimsStore,
    request: &RecordClaimRequest,
    settings: &LedgerSettings,
    now: &DateTime<Tz>,
) -> Result<RecordClaimResponse, ApiError> {
    let key: PositionKey = position_key(&request.zone, &request.specialty)?;
    let state: LedgerState = load_state(store)?;

    let command: Command = Command::RecordClaim {
        key,
        permanent_claimed: request.permanent_claimed,
        interim_claimed: request.interim_claimed,
    };
    let command_name: &str = command.name();

    let transition: TransitionResult = apply(
        catalog,
        &state,
        command,
        EventTimestamp::from_datetime(now),
        settings.bounds,
    )
    .map_err(|e| {
        info!(
            zone = %request.zone,
            specialty = %request.specialty,
            error = %e,
            "Rejected claim"
        );
        translate_core_error(e)
    })?;

    store
        .save(&transition.new_state)
        .map_err(translate_persistence_error)?;

    let TransitionOutcome::ClaimRecorded(position) = transition.outcome else {
        return Err(ApiError::Internal {
            message: format!("{command_name} produced an unexpected outcome"),
        });
    };

    info!(
        zone = %position.zone,
        specialty = %position.specialty,
        permanent_claimed = position.permanent_claimed,
        interim_claimed = position.interim_claimed,
        total_available = position.total_available,
        "Recorded claim"
    );

    Ok(RecordClaimResponse {
        message: format!(
            "Recorded claims for '{}' in zone '{}'",
            position.specialty, position.zone
        ),
        last_updated: transition
            .new_state
            .event
            .last_updated
            .map(|ts| ts.as_str().to_string()),
        position,
    })
}

/// Computes what a claim would leave available, without writing anything.
///
/// # Errors
///
/// Returns the same validation errors `record_claim` would.
pub fn preview_claim_request(
    catalog: &[PositionRecord],
    request: &RecordClaimRequest,
) -> Result<PreviewClaimResponse, ApiError> {
    let key: PositionKey = position_key(&request.zone, &request.specialty)?;
    let position: AvailabilityRow = preview_claim(
        catalog,
        &key,
        request.permanent_claimed,
        request.interim_claimed,
    )
    .map_err(translate_core_error)?;

    Ok(PreviewClaimResponse { position })
}

/// Moves the event to another day. `last_updated` is left alone.
///
/// # Errors
///
/// Returns an error if the day is out of range or the store fails.
pub fn set_event_day(
    catalog: &[PositionRecord],
    store: &mut dyn ClaimsStore,
    request: SetEventDayRequest,
    settings: &LedgerSettings,
    now: &DateTime<Tz>,
) -> Result<SetEventDayResponse, ApiError> {
    let state: LedgerState = load_state(store)?;

    let transition: TransitionResult = apply(
        catalog,
        &state,
        Command::SetEventDay { day: request.day },
        EventTimestamp::from_datetime(now),
        settings.bounds,
    )
    .map_err(translate_core_error)?;

    store
        .save(&transition.new_state)
        .map_err(translate_persistence_error)?;

    let TransitionOutcome::EventDayChanged { previous, current } = transition.outcome else {
        return Err(ApiError::Internal {
            message: String::from("SetEventDay produced an unexpected outcome"),
        });
    };

    info!(previous, current, "Event day changed");

    Ok(SetEventDayResponse {
        previous_day: previous,
        event_day: current,
        message: format!("Event day set to {current}"),
    })
}

/// Renders the filtered positions as a CSV download.
///
/// # Errors
///
/// Returns an error if the query is invalid, the store cannot be read, or
/// rendering fails.
pub fn export_positions(
    catalog: &[PositionRecord],
    store: &mut dyn ClaimsStore,
    query: &PositionsQuery,
    now: &DateTime<Tz>,
) -> Result<CsvExport, ApiError> {
    let filter: RowFilter = query.to_filter()?;
    let state: LedgerState = load_state(store)?;
    let rows: Vec<AvailabilityRow> = filter_rows(&derive_rows(catalog, &state), &filter);

    let export: CsvExport = build_export(&rows, state.event.event_day, now)?;
    info!(file_name = %export.file_name, rows = export.rows, "Rendered export");
    Ok(export)
}

/// Reads the catalog through the cache.
///
/// # Errors
///
/// Returns `CatalogUnavailable` or `CatalogFormat` if the load fails.
pub fn load_catalog(cache: &mut CatalogCache) -> Result<Arc<Vec<PositionRecord>>, ApiError> {
    cache.get().map_err(translate_catalog_error)
}

/// Drops the cached catalog and loads it again.
///
/// # Errors
///
/// Returns an error if the reload fails; the cache stays empty in that case.
pub fn refresh_catalog(cache: &mut CatalogCache) -> Result<RefreshCatalogResponse, ApiError> {
    cache.clear();
    let catalog: Arc<Vec<PositionRecord>> = load_catalog(cache)?;
    info!(source = %cache.describe(), positions = catalog.len(), "Catalog refreshed");

    Ok(RefreshCatalogResponse {
        positions: catalog.len(),
        message: format!("Reloaded {} positions", catalog.len()),
    })
}

/// Opens an admin session.
///
/// # Errors
///
/// Returns an error if the password is incorrect.
pub fn login(
    gate: &AdminGate,
    sessions: &mut SessionRegistry,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let session_token: String = AuthenticationService::login(gate, sessions, &request.password)?;

    Ok(LoginResponse {
        session_token,
        message: String::from("Logged in"),
    })
}

/// Ends an admin session.
///
/// # Errors
///
/// Returns an error if the token does not belong to a live session.
pub fn logout(
    sessions: &mut SessionRegistry,
    session_token: &str,
) -> Result<LogoutResponse, ApiError> {
    AuthenticationService::logout(sessions, session_token)?;
    Ok(LogoutResponse {
        message: String::from("Logged out"),
    })
}
