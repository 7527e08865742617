// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flat sheets where a zone name sits alone on a row and the specialty rows
//! of that zone follow it:
//!
//! ```text
//! Norte
//! Especialidad   | Definitivas | Interinas
//! Cardiología    | 3           | 2
//! Pediatría      | 1           | 0
//!
//! Sur
//! Anestesiología | 2           | 1
//! ```
//!
//! Zones are separated by at least one blank row. A row holding only a label
//! opens a zone when it starts a section (the first non-blank row of the
//! sheet, or the first after a blank row). Inside a section the same row is a
//! specialty whose quotas are empty, which count as zero.
//!
//! Parsing runs in two passes. [`classify_rows`] labels every row from its
//! contents and whether it starts a section; [`emit_records`] walks the labels
//! and attaches each detail row to the zone header above it.

use crate::cell::{Cell, cell_at};
use crate::error::CatalogError;
use crate::sheet::{RecordCollector, SheetRow};
use crate::tabular::{SPECIALTY_HEADERS, normalize_header};
use plazas_domain::PositionRecord;

/// The role a row plays in a grouped sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionRow {
    /// A lone label at the start of a section: opens a new zone.
    ZoneHeader(String),
    /// A column caption row (`Especialidad | Definitivas | Interinas`).
    Caption,
    /// A specialty with its two quotas.
    Detail {
        /// The specialty label, if present.
        specialty: Option<String>,
        /// Permanent quota cell.
        permanent: Cell,
        /// Interim quota cell.
        interim: Cell,
    },
    /// Nothing in the row.
    Blank,
}

/// Labels a single row.
///
/// `section_start` is true for the first non-blank row of the sheet and for
/// the first row after a blank one.
#[must_use]
pub fn classify(row: &SheetRow, section_start: bool) -> SectionRow {
    if row.is_blank() {
        return SectionRow::Blank;
    }

    let first: Option<String> = cell_at(&row.cells, 0).text();
    let rest_blank: bool = row.cells.iter().skip(1).all(Cell::is_empty);

    match first {
        Some(name) if section_start && rest_blank => SectionRow::ZoneHeader(name),
        Some(label) if SPECIALTY_HEADERS.contains(&normalize_header(&label).as_str()) => {
            SectionRow::Caption
        }
        specialty => SectionRow::Detail {
            specialty,
            permanent: cell_at(&row.cells, 1).clone(),
            interim: cell_at(&row.cells, 2).clone(),
        },
    }
}

/// First pass: labels every row, keeping its row number.
#[must_use]
pub fn classify_rows(rows: &[SheetRow]) -> Vec<(usize, SectionRow)> {
    let mut section_start: bool = true;

    rows.iter()
        .map(|row| {
            let label: SectionRow = classify(row, section_start);
            section_start = matches!(label, SectionRow::Blank);
            (row.number, label)
        })
        .collect()
}

/// Second pass: turns labelled rows into position records.
///
/// # Errors
///
/// Returns `CatalogError::Format` if a detail row appears before any zone
/// header, lacks a specialty, carries an invalid quota, or repeats a
/// position.
pub fn emit_records(
    labelled: &[(usize, SectionRow)],
) -> Result<Vec<PositionRecord>, CatalogError> {
    let mut collector: RecordCollector = RecordCollector::default();
    let mut current_zone: Option<&str> = None;

    for (number, row) in labelled {
        match row {
            SectionRow::Blank | SectionRow::Caption => {}
            SectionRow::ZoneHeader(name) => current_zone = Some(name.as_str()),
            SectionRow::Detail {
                specialty,
                permanent,
                interim,
            } => {
                let zone: &str = current_zone.ok_or_else(|| {
                    CatalogError::format(*number, "Specialty row appears before any zone header")
                })?;
                let specialty: &str = specialty
                    .as_deref()
                    .ok_or_else(|| CatalogError::format(*number, "specialty is empty"))?;
                let permanent: u32 = permanent.count().map_err(|reason| {
                    CatalogError::format(*number, format!("permanent_total: {reason}"))
                })?;
                let interim: u32 = interim.count().map_err(|reason| {
                    CatalogError::format(*number, format!("interim_total: {reason}"))
                })?;
                collector.push(*number, zone, specialty, permanent, interim)?;
            }
        }
    }

    Ok(collector.finish())
}

/// Parses a grouped sheet.
///
/// # Errors
///
/// See [`emit_records`].
pub fn parse_grouped(rows: &[SheetRow]) -> Result<Vec<PositionRecord>, CatalogError> {
    emit_records(&classify_rows(rows))
}
