// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use plazas::LedgerState;
use plazas_domain::{PositionRecord, Specialty, Zone};
use plazas_persistence::{ClaimsStore, PersistenceError};

use crate::auth::{AdminGate, MIN_HASH_COST};
use crate::handlers::LedgerSettings;
use crate::request_response::RecordClaimRequest;

pub const TEST_PASSWORD: &str = "plazas-admin";

pub fn create_test_catalog() -> Vec<PositionRecord> {
    vec![
        PositionRecord::new(
            Zone::new("Norte").unwrap(),
            Specialty::new("Cardiología").unwrap(),
            3,
            2,
        ),
        PositionRecord::new(
            Zone::new("Norte").unwrap(),
            Specialty::new("Pediatría").unwrap(),
            1,
            0,
        ),
        PositionRecord::new(
            Zone::new("Sur").unwrap(),
            Specialty::new("Anestesiología").unwrap(),
            2,
            1,
        ),
    ]
}

pub fn create_test_settings() -> LedgerSettings {
    LedgerSettings::default()
}

pub fn create_test_now() -> DateTime<Tz> {
    chrono_tz::America::Tijuana
        .with_ymd_and_hms(2026, 3, 5, 9, 15, 0)
        .unwrap()
}

pub fn create_test_gate() -> AdminGate {
    let hash: String = AdminGate::hash_password(TEST_PASSWORD, MIN_HASH_COST).unwrap();
    AdminGate::from_hash(&hash).unwrap()
}

pub fn create_claim_request(
    zone: &str,
    specialty: &str,
    permanent_claimed: i64,
    interim_claimed: i64,
) -> RecordClaimRequest {
    RecordClaimRequest {
        zone: zone.to_string(),
        specialty: specialty.to_string(),
        permanent_claimed,
        interim_claimed,
    }
}

/// A store whose reads or writes always fail.
pub struct FailingStore {
    pub fail_load: bool,
    pub fail_save: bool,
    pub state: LedgerState,
}

impl FailingStore {
    pub fn unreadable() -> Self {
        Self {
            fail_load: true,
            fail_save: false,
            state: LedgerState::default(),
        }
    }

    pub fn unwritable() -> Self {
        Self {
            fail_load: false,
            fail_save: true,
            state: LedgerState::default(),
        }
    }
}

impl ClaimsStore for FailingStore {
    fn describe(&self) -> String {
        String::from("failing")
    }

    fn load(&mut self) -> Result<LedgerState, PersistenceError> {
        if self.fail_load {
            return Err(PersistenceError::StoreUnavailable(String::from(
                "file does not exist",
            )));
        }
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &LedgerState) -> Result<(), PersistenceError> {
        if self.fail_save {
            return Err(PersistenceError::WriteFailed(String::from("disk full")));
        }
        self.state = state.clone();
        Ok(())
    }
}
