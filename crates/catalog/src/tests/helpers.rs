// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CatalogError, CatalogSource, Cell, SheetRow, number_rows};
use plazas_domain::{PositionRecord, Specialty, Zone};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builds numbered rows from text cells; `""` becomes an empty cell.
pub fn create_test_rows(rows: &[&[&str]]) -> Vec<SheetRow> {
    let cells: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| row.iter().map(|value| Cell::from_text(value)).collect())
        .collect();
    number_rows(cells, 1)
}

pub fn create_test_record(
    zone: &str,
    specialty: &str,
    permanent: u32,
    interim: u32,
) -> PositionRecord {
    PositionRecord::new(
        Zone::new(zone).unwrap(),
        Specialty::new(specialty).unwrap(),
        permanent,
        interim,
    )
}

/// A source that counts loads and can be switched to failing.
pub struct CountingSource {
    pub loads: Arc<AtomicUsize>,
    pub fail: bool,
    pub records: Vec<PositionRecord>,
}

impl CountingSource {
    pub fn new(records: Vec<PositionRecord>) -> (Self, Arc<AtomicUsize>) {
        let loads: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        (
            Self {
                loads: Arc::clone(&loads),
                fail: false,
                records,
            },
            loads,
        )
    }
}

impl CatalogSource for CountingSource {
    fn describe(&self) -> String {
        String::from("counting")
    }

    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::Unavailable {
                source_name: String::from("counting"),
                reason: String::from("offline"),
            });
        }
        Ok(self.records.clone())
    }
}
