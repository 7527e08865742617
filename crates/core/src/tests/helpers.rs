// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas_domain::{EventTimestamp, PositionKey, PositionRecord, Specialty, Zone};

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

pub fn create_test_key() -> PositionKey {
    PositionKey::from_labels("Norte", "Cardiología").unwrap()
}

pub fn create_test_timestamp() -> EventTimestamp {
    EventTimestamp::from_stored(String::from("05/03/2026 09:15:00"))
}

pub fn create_later_timestamp() -> EventTimestamp {
    EventTimestamp::from_stored(String::from("05/03/2026 10:30:00"))
}
