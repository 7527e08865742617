// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cell::Cell;
use crate::error::CatalogError;
use plazas_domain::{PositionKey, PositionRecord, Specialty, Zone};
use std::collections::HashSet;

/// One row of a sheet together with its position in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number as a spreadsheet user would see it.
    pub number: usize,
    /// The cells of the row, left to right.
    pub cells: Vec<Cell>,
}

impl SheetRow {
    /// Creates a row.
    #[must_use]
    pub const fn new(number: usize, cells: Vec<Cell>) -> Self {
        Self { number, cells }
    }

    /// Returns true if every cell is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// Numbers rows consecutively from `first_number`.
#[must_use]
pub fn number_rows(rows: Vec<Vec<Cell>>, first_number: usize) -> Vec<SheetRow> {
    rows.into_iter()
        .enumerate()
        .map(|(offset, cells)| SheetRow::new(first_number + offset, cells))
        .collect()
}

/// Accumulates parsed records, rejecting duplicate positions.
#[derive(Debug, Default)]
pub(crate) struct RecordCollector {
    seen: HashSet<PositionKey>,
    records: Vec<PositionRecord>,
}

impl RecordCollector {
    pub(crate) fn push(
        &mut self,
        row: usize,
        zone: &str,
        specialty: &str,
        permanent_total: u32,
        interim_total: u32,
    ) -> Result<(), CatalogError> {
        let zone: Zone =
            Zone::new(zone).map_err(|e| CatalogError::format(row, e.to_string()))?;
        let specialty: Specialty =
            Specialty::new(specialty).map_err(|e| CatalogError::format(row, e.to_string()))?;
        let record: PositionRecord =
            PositionRecord::new(zone, specialty, permanent_total, interim_total);

        if !self.seen.insert(record.key()) {
            return Err(CatalogError::format(
                row,
                format!(
                    "Position '{}' appears more than once in zone '{}'",
                    record.specialty, record.zone
                ),
            ));
        }

        self.records.push(record);
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<PositionRecord> {
        self.records
    }
}
