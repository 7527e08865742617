// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV report of derived availability.
//!
//! The report is read-only and never written back. It starts with a UTF-8
//! byte order mark so spreadsheet programs pick the right encoding for
//! accented zone and specialty names.

use chrono::DateTime;
use chrono_tz::Tz;
use plazas_domain::AvailabilityRow;
use thiserror::Error;

/// Byte order mark prefixed to every export.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Media type of the export.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Column headers, in order.
pub const EXPORT_HEADERS: [&str; 9] = [
    "Zone",
    "Specialty",
    "Permanent-Total",
    "Permanent-Claimed",
    "Permanent-Available",
    "Interim-Total",
    "Interim-Claimed",
    "Interim-Available",
    "Total-Available",
];

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    /// The buffered output could not be recovered from the writer.
    #[error("Failed to finish CSV export: {0}")]
    Finish(String),
}

/// A rendered export, ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download name.
    pub file_name: String,
    /// Encoded CSV, BOM included.
    pub body: Vec<u8>,
    /// Number of data rows.
    pub rows: usize,
}

/// Suggested file name: `plazas_day{day}_{YYYYmmdd_HHMM}.csv`.
#[must_use]
pub fn export_file_name(event_day: u32, now: &DateTime<Tz>) -> String {
    format!("plazas_day{event_day}_{}.csv", now.format("%Y%m%d_%H%M"))
}

/// Renders rows as CSV with a header line.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn render_csv(rows: &[AvailabilityRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(EXPORT_HEADERS)?;

    for row in rows {
        writer.write_record([
            row.zone.name().to_string(),
            row.specialty.name().to_string(),
            row.permanent_total.to_string(),
            row.permanent_claimed.to_string(),
            row.permanent_available.to_string(),
            row.interim_total.to_string(),
            row.interim_claimed.to_string(),
            row.interim_available.to_string(),
            row.total_available.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Finish(e.error().to_string()))
}

/// Renders rows into a named export.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn build_export(
    rows: &[AvailabilityRow],
    event_day: u32,
    now: &DateTime<Tz>,
) -> Result<CsvExport, ExportError> {
    Ok(CsvExport {
        file_name: export_file_name(event_day, now),
        body: render_csv(rows)?,
        rows: rows.len(),
    })
}
