// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas::LedgerState;
use plazas_domain::{ClaimRecord, EventState, EventTimestamp, PositionKey};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh, empty directory under the system temp dir.
pub fn create_test_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir: PathBuf = std::env::temp_dir().join(format!(
        "plazas_persistence_{}_{id}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn create_test_state() -> LedgerState {
    let mut claims: BTreeMap<PositionKey, ClaimRecord> = BTreeMap::new();
    claims.insert(
        PositionKey::from_labels("Norte", "Cardiología").unwrap(),
        ClaimRecord::new(2, 1),
    );
    claims.insert(
        PositionKey::from_labels("Zona Costa", "Medicina Interna").unwrap(),
        ClaimRecord::new(0, 3),
    );
    LedgerState::new(
        claims,
        EventState::new(
            2,
            Some(EventTimestamp::from_stored(String::from("19/10/2026 09:15:00"))),
        ),
    )
}
