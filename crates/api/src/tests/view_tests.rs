// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for read-only views and catalog refresh.

use std::collections::BTreeMap;
use std::time::Duration;

use plazas::LedgerState;
use plazas_catalog::{CatalogCache, CatalogError, CatalogSource, StaticCatalog};
use plazas_domain::{
    ClaimRecord, EventState, EventTimestamp, PositionKey, PositionRecord, ZoneStatus,
};
use plazas_persistence::InMemoryStore;

use crate::ApiError;
use crate::handlers::{get_dashboard, list_positions, list_zones, record_claim, refresh_catalog};
use crate::request_response::{
    DashboardResponse, PositionsQuery, PositionsResponse, RefreshCatalogResponse, ZonesResponse,
};
use crate::tests::helpers::{
    FailingStore, create_claim_request, create_test_catalog, create_test_now,
    create_test_settings,
};

fn create_claimed_store() -> InMemoryStore {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();
    let settings = create_test_settings();
    let now = create_test_now();

    record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 3, 2),
        &settings,
        &now,
    )
    .unwrap();
    record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Pediatría", 1, 0),
        &settings,
        &now,
    )
    .unwrap();
    store
}

#[test]
fn test_dashboard_on_empty_store() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let response: DashboardResponse =
        get_dashboard(&catalog, &mut store, &create_test_settings()).unwrap();

    assert_eq!(response.event_day, 1);
    assert_eq!(response.max_event_day, 10);
    assert_eq!(response.last_updated, None);
    assert_eq!(response.summary.totals.total, 9);
    assert_eq!(response.summary.totals.total_available, 9);
    assert_eq!(response.zones_total, 2);
    assert_eq!(response.zones_available, 2);
    assert_eq!(response.over_claimed_positions, 0);
}

#[test]
fn test_dashboard_after_zone_exhausted() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = create_claimed_store();

    let response: DashboardResponse =
        get_dashboard(&catalog, &mut store, &create_test_settings()).unwrap();

    assert_eq!(response.summary.totals.total_claimed, 6);
    assert_eq!(response.summary.totals.total_available, 3);
    assert_eq!(response.summary.totals.specialties_available, 1);
    assert_eq!(response.zones_available, 1);
    assert_eq!(response.last_updated.as_deref(), Some("05/03/2026 09:15:00"));
}

#[test]
fn test_dashboard_counts_over_claimed_positions() {
    // A catalog reload lowered Pediatría below the stored claim.
    let mut claims: BTreeMap<PositionKey, ClaimRecord> = BTreeMap::new();
    claims.insert(
        PositionKey::from_labels("Norte", "Pediatría").unwrap(),
        ClaimRecord::new(2, 0),
    );
    let state: LedgerState = LedgerState::new(
        claims,
        EventState::new(
            3,
            Some(EventTimestamp::from_stored(String::from(
                "04/03/2026 18:00:00",
            ))),
        ),
    );
    let mut store: InMemoryStore = InMemoryStore::with_state(state);

    let response: DashboardResponse =
        get_dashboard(&create_test_catalog(), &mut store, &create_test_settings()).unwrap();

    assert_eq!(response.event_day, 3);
    assert_eq!(response.over_claimed_positions, 1);
    assert_eq!(response.summary.totals.permanent_available, 5);
}

#[test]
fn test_dashboard_reports_unreadable_store() {
    let mut store: FailingStore = FailingStore::unreadable();

    let result: Result<DashboardResponse, ApiError> =
        get_dashboard(&create_test_catalog(), &mut store, &create_test_settings());

    assert!(matches!(result, Err(ApiError::StoreUnavailable { .. })));
}

#[test]
fn test_list_positions_keeps_catalog_order() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let response: PositionsResponse =
        list_positions(&catalog, &mut store, &PositionsQuery::default()).unwrap();

    assert_eq!(response.count, 3);
    let specialties: Vec<&str> = response
        .positions
        .iter()
        .map(|row| row.specialty.name())
        .collect();
    assert_eq!(specialties, vec!["Cardiología", "Pediatría", "Anestesiología"]);
}

#[test]
fn test_list_positions_sorted_and_filtered() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = create_claimed_store();

    let query: PositionsQuery = PositionsQuery {
        zones: Some(String::from("Norte, Sur")),
        only_available: Some(true),
        kind: Some(String::from("interim")),
        sorted: Some(true),
    };
    let response: PositionsResponse = list_positions(&catalog, &mut store, &query).unwrap();

    assert_eq!(response.count, 1);
    assert_eq!(response.positions[0].zone.name(), "Sur");
    assert_eq!(response.positions[0].interim_available, 1);
}

#[test]
fn test_list_positions_hides_exhausted_rows_by_default() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = create_claimed_store();

    let hidden: PositionsResponse =
        list_positions(&catalog, &mut store, &PositionsQuery::default()).unwrap();
    assert_eq!(hidden.count, 1);
    assert_eq!(hidden.positions[0].specialty.name(), "Anestesiología");

    let query: PositionsQuery = PositionsQuery {
        only_available: Some(false),
        ..PositionsQuery::default()
    };
    let shown: PositionsResponse = list_positions(&catalog, &mut store, &query).unwrap();
    assert_eq!(shown.count, 3);
}

#[test]
fn test_list_positions_single_zone() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let query: PositionsQuery = PositionsQuery {
        zones: Some(String::from("Norte")),
        sorted: Some(true),
        ..PositionsQuery::default()
    };
    let response: PositionsResponse = list_positions(&catalog, &mut store, &query).unwrap();

    let specialties: Vec<&str> = response
        .positions
        .iter()
        .map(|row| row.specialty.name())
        .collect();
    assert_eq!(specialties, vec!["Cardiología", "Pediatría"]);
}

#[test]
fn test_list_positions_rejects_unknown_kind() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let query: PositionsQuery = PositionsQuery {
        kind: Some(String::from("temporary")),
        ..PositionsQuery::default()
    };
    let result: Result<PositionsResponse, ApiError> =
        list_positions(&catalog, &mut store, &query);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "kind"
    ));
}

#[test]
fn test_list_zones_reports_status() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = create_claimed_store();

    let response: ZonesResponse = list_zones(&catalog, &mut store).unwrap();

    assert_eq!(response.zones.len(), 2);
    assert_eq!(response.zones[0].zone.name(), "Norte");
    assert_eq!(response.zones[0].status, ZoneStatus::Exhausted);
    assert_eq!(response.zones[0].totals.total_claimed, 6);
    assert_eq!(response.zones[1].zone.name(), "Sur");
    assert_eq!(response.zones[1].status, ZoneStatus::Available);
    assert_eq!(response.summary.totals.total_available, 3);
    assert_eq!(response.summary.totals.total, 9);
}

struct BrokenSource;

impl CatalogSource for BrokenSource {
    fn describe(&self) -> String {
        String::from("broken.csv")
    }

    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        Err(CatalogError::Unavailable {
            source_name: self.describe(),
            reason: String::from("No such file or directory"),
        })
    }
}

#[test]
fn test_refresh_catalog_reloads() {
    let mut cache: CatalogCache = CatalogCache::new(
        Box::new(StaticCatalog::new(create_test_catalog())),
        Duration::from_secs(60),
    );

    let response: RefreshCatalogResponse = refresh_catalog(&mut cache).unwrap();

    assert_eq!(response.positions, 3);
}

#[test]
fn test_refresh_catalog_reports_unavailable_source() {
    let mut cache: CatalogCache =
        CatalogCache::new(Box::new(BrokenSource), Duration::from_secs(60));

    let result: Result<RefreshCatalogResponse, ApiError> = refresh_catalog(&mut cache);

    match result {
        Err(ApiError::CatalogUnavailable { message }) => {
            assert!(message.contains("broken.csv"));
        }
        other => panic!("Expected CatalogUnavailable, got {other:?}"),
    }
}
