// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Plazas Monitor.
//!
//! Handlers here take an explicit catalog snapshot and claims store, run the
//! core transition, and translate every lower-layer error into [`ApiError`].
//! Nothing in this crate knows about HTTP.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod export;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AdminGate, AuthenticationService, INCORRECT_PASSWORD, MIN_HASH_COST, SessionRegistry,
};
pub use error::{
    ApiError, AuthError, translate_catalog_error, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use export::{
    CSV_CONTENT_TYPE, CsvExport, EXPORT_HEADERS, ExportError, UTF8_BOM, build_export,
    export_file_name, render_csv,
};
pub use handlers::{
    DEFAULT_TIMEZONE, LedgerSettings, derive_rows, export_positions, get_dashboard, list_positions,
    list_zones, load_catalog, load_state, login, logout, preview_claim_request, record_claim,
    refresh_catalog, set_event_day,
};
pub use request_response::{
    DashboardResponse, LoginRequest, LoginResponse, LogoutResponse, PositionsQuery,
    PositionsResponse, PreviewClaimResponse, RecordClaimRequest, RecordClaimResponse,
    RefreshCatalogResponse, SetEventDayRequest, SetEventDayResponse, ZonesResponse,
};
