// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for recording claims, previews and event-day changes.

use plazas::LedgerState;
use plazas_domain::{ClaimRecord, PositionKey};
use plazas_persistence::{ClaimsStore, InMemoryStore};

use crate::ApiError;
use crate::handlers::{preview_claim_request, record_claim, set_event_day};
use crate::request_response::{
    PreviewClaimResponse, RecordClaimResponse, SetEventDayRequest, SetEventDayResponse,
};
use crate::tests::helpers::{
    FailingStore, create_claim_request, create_test_catalog, create_test_now,
    create_test_settings,
};

#[test]
fn test_record_claim_updates_availability_and_timestamp() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let response: RecordClaimResponse = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 2, 2),
        &create_test_settings(),
        &create_test_now(),
    )
    .unwrap();

    assert_eq!(response.position.permanent_available, 1);
    assert_eq!(response.position.interim_available, 0);
    assert_eq!(response.position.total_available, 1);
    assert_eq!(response.last_updated.as_deref(), Some("05/03/2026 09:15:00"));
    assert_eq!(store.save_count(), 1);

    let state: LedgerState = store.load().unwrap();
    let key: PositionKey = PositionKey::from_labels("Norte", "Cardiología").unwrap();
    assert_eq!(state.claim(&key), ClaimRecord::new(2, 2));
}

#[test]
fn test_record_claim_trims_labels() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let response: RecordClaimResponse = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("  Sur ", " Anestesiología", 1, 0),
        &create_test_settings(),
        &create_test_now(),
    )
    .unwrap();

    assert_eq!(response.position.zone.name(), "Sur");
    assert_eq!(response.position.total_available, 2);
}

#[test]
fn test_rejected_claim_writes_nothing() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();
    let settings = create_test_settings();
    let now = create_test_now();

    record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 1, 1),
        &settings,
        &now,
    )
    .unwrap();

    let result: Result<RecordClaimResponse, ApiError> = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 4, 0),
        &settings,
        &now,
    );

    match result {
        Err(ApiError::InvalidInput { field, message }) => {
            assert_eq!(field, "permanent_claimed");
            assert!(message.contains("between 0 and 3"));
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    assert_eq!(store.save_count(), 1);
    let key: PositionKey = PositionKey::from_labels("Norte", "Cardiología").unwrap();
    assert_eq!(store.load().unwrap().claim(&key), ClaimRecord::new(1, 1));
}

#[test]
fn test_negative_interim_claim_is_rejected() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let result: Result<RecordClaimResponse, ApiError> = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Sur", "Anestesiología", 0, -1),
        &create_test_settings(),
        &create_test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "interim_claimed"
    ));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_unknown_position_is_rejected() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let result: Result<RecordClaimResponse, ApiError> = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Sur", "Pediatría", 0, 0),
        &create_test_settings(),
        &create_test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "specialty"
    ));
}

#[test]
fn test_empty_zone_label_is_rejected() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();

    let result: Result<RecordClaimResponse, ApiError> = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("   ", "Cardiología", 0, 0),
        &create_test_settings(),
        &create_test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "zone"
    ));
}

#[test]
fn test_record_claim_reports_unreadable_store() {
    let catalog = create_test_catalog();
    let mut store: FailingStore = FailingStore::unreadable();

    let result: Result<RecordClaimResponse, ApiError> = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 1, 0),
        &create_test_settings(),
        &create_test_now(),
    );

    assert!(matches!(result, Err(ApiError::StoreUnavailable { .. })));
}

#[test]
fn test_record_claim_reports_failed_write() {
    let catalog = create_test_catalog();
    let mut store: FailingStore = FailingStore::unwritable();

    let result: Result<RecordClaimResponse, ApiError> = record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 1, 0),
        &create_test_settings(),
        &create_test_now(),
    );

    assert!(matches!(result, Err(ApiError::Internal { .. })));
    assert_eq!(store.state, LedgerState::default());
}

#[test]
fn test_preview_does_not_write() {
    let catalog = create_test_catalog();

    let response: PreviewClaimResponse =
        preview_claim_request(&catalog, &create_claim_request("Norte", "Pediatría", 1, 0))
            .unwrap();

    assert_eq!(response.position.total_available, 0);
    assert!(!response.position.is_available());
}

#[test]
fn test_preview_rejects_over_claim() {
    let catalog = create_test_catalog();

    let result: Result<PreviewClaimResponse, ApiError> =
        preview_claim_request(&catalog, &create_claim_request("Norte", "Pediatría", 0, 1));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "interim_claimed"
    ));
}

#[test]
fn test_set_event_day_keeps_last_updated() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();
    let settings = create_test_settings();
    let now = create_test_now();

    record_claim(
        &catalog,
        &mut store,
        &create_claim_request("Norte", "Cardiología", 1, 0),
        &settings,
        &now,
    )
    .unwrap();

    let later = now + chrono::Duration::hours(3);
    let response: SetEventDayResponse = set_event_day(
        &catalog,
        &mut store,
        SetEventDayRequest { day: 4 },
        &settings,
        &later,
    )
    .unwrap();

    assert_eq!(response.previous_day, 1);
    assert_eq!(response.event_day, 4);

    let state: LedgerState = store.load().unwrap();
    assert_eq!(state.event.event_day, 4);
    assert_eq!(
        state.event.last_updated.map(|ts| ts.as_str().to_string()),
        Some(String::from("05/03/2026 09:15:00"))
    );
}

#[test]
fn test_set_event_day_out_of_range() {
    let catalog = create_test_catalog();
    let mut store: InMemoryStore = InMemoryStore::new();
    let settings = create_test_settings();

    for day in [0, 11, -2] {
        let result: Result<SetEventDayResponse, ApiError> = set_event_day(
            &catalog,
            &mut store,
            SetEventDayRequest { day },
            &settings,
            &create_test_now(),
        );
        assert!(matches!(
            result,
            Err(ApiError::InvalidInput { ref field, .. }) if field == "event_day"
        ));
    }
    assert_eq!(store.save_count(), 0);
}
