// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One position per row under a header line.

use crate::cell::{Cell, cell_at};
use crate::error::CatalogError;
use crate::sheet::{RecordCollector, SheetRow};
use plazas_domain::PositionRecord;
use std::collections::HashMap;

/// Accepted names for each required column, after normalization.
const ZONE_HEADERS: &[&str] = &["zone", "zona"];
pub(crate) const SPECIALTY_HEADERS: &[&str] = &["specialty", "especialidad"];
const PERMANENT_HEADERS: &[&str] = &["permanent_total", "def_total"];
const INTERIM_HEADERS: &[&str] = &["interim_total", "int_total"];

/// Normalizes a header for case-insensitive, whitespace-tolerant matching.
pub(crate) fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '-'], "_")
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    zone: usize,
    specialty: usize,
    permanent: usize,
    interim: usize,
}

fn map_columns(header: &SheetRow) -> Result<ColumnMap, CatalogError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, cell) in header.cells.iter().enumerate() {
        if let Some(text) = cell.text() {
            header_map.entry(normalize_header(&text)).or_insert(idx);
        }
    }

    let mut missing: Vec<&str> = Vec::new();
    let mut find = |aliases: &[&'static str]| -> usize {
        aliases
            .iter()
            .find_map(|alias| header_map.get(*alias).copied())
            .unwrap_or_else(|| {
                missing.push(aliases[0]);
                0
            })
    };

    let columns: ColumnMap = ColumnMap {
        zone: find(ZONE_HEADERS),
        specialty: find(SPECIALTY_HEADERS),
        permanent: find(PERMANENT_HEADERS),
        interim: find(INTERIM_HEADERS),
    };

    if missing.is_empty() {
        Ok(columns)
    } else {
        Err(CatalogError::Layout {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        })
    }
}

fn required_text(row: &SheetRow, idx: usize, field: &str) -> Result<String, CatalogError> {
    cell_at(&row.cells, idx)
        .text()
        .ok_or_else(|| CatalogError::format(row.number, format!("{field} is empty")))
}

fn required_count(row: &SheetRow, idx: usize, field: &str) -> Result<u32, CatalogError> {
    let cell: &Cell = cell_at(&row.cells, idx);
    cell.count()
        .map_err(|reason| CatalogError::format(row.number, format!("{field}: {reason}")))
}

/// Parses a sheet whose first non-blank row names the columns.
///
/// Blank rows are skipped. Column order is free and extra columns (such as
/// claimed counts kept alongside the totals) are ignored.
///
/// # Errors
///
/// Returns `CatalogError::Layout` if the header row is absent or lacks a
/// required column, and `CatalogError::Format` for the first unparseable or
/// duplicate row.
pub fn parse_tabular(rows: &[SheetRow]) -> Result<Vec<PositionRecord>, CatalogError> {
    let mut non_blank = rows.iter().filter(|row| !row.is_blank());
    let header: &SheetRow = non_blank.next().ok_or_else(|| CatalogError::Layout {
        reason: String::from("Catalog has no header row"),
    })?;
    let columns: ColumnMap = map_columns(header)?;

    let mut collector: RecordCollector = RecordCollector::default();
    for row in non_blank {
        let zone: String = required_text(row, columns.zone, "zone")?;
        let specialty: String = required_text(row, columns.specialty, "specialty")?;
        let permanent: u32 = required_count(row, columns.permanent, "permanent_total")?;
        let interim: u32 = required_count(row, columns.interim, "interim_total")?;
        collector.push(row.number, &zone, &specialty, permanent, interim)?;
    }

    Ok(collector.finish())
}
