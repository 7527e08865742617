// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use crate::{ClaimRecord, PositionKey, PositionRecord, Specialty, Zone};

pub fn position(zone: &str, specialty: &str, permanent: u32, interim: u32) -> PositionRecord {
    PositionRecord::new(
        Zone::new(zone).unwrap(),
        Specialty::new(specialty).unwrap(),
        permanent,
        interim,
    )
}

pub fn key(zone: &str, specialty: &str) -> PositionKey {
    PositionKey::from_labels(zone, specialty).unwrap()
}

pub fn create_test_catalog() -> Vec<PositionRecord> {
    vec![
        position("North", "Cardiology", 3, 2),
        position("North", "Pediatrics", 1, 0),
        position("South", "Anesthesiology", 2, 4),
        position("Coast", "Cardiology", 0, 1),
    ]
}

pub fn claims(entries: &[(&str, &str, u32, u32)]) -> BTreeMap<PositionKey, ClaimRecord> {
    entries
        .iter()
        .map(|(zone, specialty, permanent, interim)| {
            (key(zone, specialty), ClaimRecord::new(*permanent, *interim))
        })
        .collect()
}
