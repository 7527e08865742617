// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cell::Cell;
use crate::error::CatalogError;
use crate::grouped::parse_grouped;
use crate::sheet::{SheetRow, number_rows};
use crate::tabular::parse_tabular;
use calamine::{Data, Range, Reader, open_workbook_auto};
use plazas_domain::PositionRecord;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Default worksheet name for spreadsheet catalogs.
pub const DEFAULT_SHEET: &str = "Plazas";

/// How positions are laid out in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogLayout {
    /// A header row followed by one position per row.
    #[default]
    Tabular,
    /// Zone header rows, each followed by that zone's specialty rows.
    Grouped,
}

impl CatalogLayout {
    /// Parses numbered rows according to this layout.
    ///
    /// # Errors
    ///
    /// Returns a format error if the rows do not follow the layout.
    pub fn parse(self, rows: &[SheetRow]) -> Result<Vec<PositionRecord>, CatalogError> {
        match self {
            Self::Tabular => parse_tabular(rows),
            Self::Grouped => parse_grouped(rows),
        }
    }

    /// Converts this layout to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::Grouped => "grouped",
        }
    }
}

impl FromStr for CatalogLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tabular" | "table" => Ok(Self::Tabular),
            "grouped" | "flat" => Ok(Self::Grouped),
            other => Err(format!(
                "Invalid catalog layout '{other}' (must be tabular or grouped)"
            )),
        }
    }
}

impl std::fmt::Display for CatalogLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can produce the full set of position records.
///
/// Every call re-reads the source; caching is layered on top by
/// [`crate::CatalogCache`].
pub trait CatalogSource: Send + Sync {
    /// Human-readable description used in logs and errors.
    fn describe(&self) -> String;

    /// Loads every position record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the source cannot be read and a
    /// format error if its content cannot be parsed.
    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError>;
}

/// A catalog stored as a delimited text file.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
    layout: CatalogLayout,
}

impl CsvCatalog {
    /// Creates a source reading `path` with the given layout.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, layout: CatalogLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    /// Parses CSV content from any reader.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` on I/O failure and a format error
    /// for malformed content.
    pub fn parse_reader<R: Read>(
        reader: R,
        layout: CatalogLayout,
        source_name: &str,
    ) -> Result<Vec<PositionRecord>, CatalogError> {
        let mut csv_reader: csv::Reader<R> = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record: csv::StringRecord = result.map_err(|e| {
                if e.is_io_error() {
                    CatalogError::unavailable(source_name, &e)
                } else {
                    let row: usize = e
                        .position()
                        .and_then(|p| usize::try_from(p.line()).ok())
                        .unwrap_or(idx + 1);
                    CatalogError::format(row, e.to_string())
                }
            })?;
            // The reader skips empty lines; grouped sheets need them as separators.
            if let Some(line) = record
                .position()
                .and_then(|p| usize::try_from(p.line()).ok())
            {
                while rows.len() + 1 < line {
                    rows.push(Vec::new());
                }
            }
            rows.push(record.iter().map(Cell::from_text).collect());
        }

        layout.parse(&number_rows(rows, 1))
    }
}

impl CatalogSource for CsvCatalog {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        debug!(path = %self.path.display(), layout = %self.layout, "Reading CSV catalog");
        let file: std::fs::File = std::fs::File::open(&self.path)
            .map_err(|e| CatalogError::unavailable(self.path.display().to_string(), e))?;
        Self::parse_reader(file, self.layout, &self.path.display().to_string())
    }
}

/// A catalog stored in a worksheet of a spreadsheet workbook.
#[derive(Debug, Clone)]
pub struct XlsxCatalog {
    path: PathBuf,
    sheet: String,
    layout: CatalogLayout,
}

impl XlsxCatalog {
    /// Creates a source reading `sheet` from the workbook at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>, layout: CatalogLayout) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
            layout,
        }
    }

    fn read_rows(path: &Path, sheet: &str) -> Result<Vec<SheetRow>, CatalogError> {
        let source_name: String = path.display().to_string();
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| CatalogError::unavailable(source_name.clone(), e))?;

        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(CatalogError::unavailable(
                source_name,
                format!("worksheet '{sheet}' not found"),
            ));
        }

        let range: Range<Data> = workbook
            .worksheet_range(sheet)
            .map_err(|e| CatalogError::unavailable(source_name, e))?;

        // Ranges start at the first used cell, not at A1
        let first_row: usize = range
            .start()
            .and_then(|(row, _)| usize::try_from(row).ok())
            .unwrap_or(0)
            + 1;

        let rows: Vec<Vec<Cell>> = range
            .rows()
            .map(|row| row.iter().map(Cell::from_data).collect())
            .collect();

        Ok(number_rows(rows, first_row))
    }
}

impl CatalogSource for XlsxCatalog {
    fn describe(&self) -> String {
        format!("xlsx:{}#{}", self.path.display(), self.sheet)
    }

    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        debug!(
            path = %self.path.display(),
            sheet = %self.sheet,
            layout = %self.layout,
            "Reading spreadsheet catalog"
        );
        let rows: Vec<SheetRow> = Self::read_rows(&self.path, &self.sheet)?;
        self.layout.parse(&rows)
    }
}

/// A fixed set of records, for tests and demonstrations.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<PositionRecord>,
}

impl StaticCatalog {
    /// Creates a source that always returns `records`.
    #[must_use]
    pub const fn new(records: Vec<PositionRecord>) -> Self {
        Self { records }
    }
}

impl CatalogSource for StaticCatalog {
    fn describe(&self) -> String {
        format!("static:{} records", self.records.len())
    }

    fn load(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}
