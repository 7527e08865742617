// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loading of the position catalog: which positions exist and their quotas.
//!
//! The catalog is read-only from the ledger's point of view. It comes from a
//! CSV file or a worksheet, in either a plain tabular layout or a grouped
//! layout with zone header rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cache;
mod cell;
mod error;
mod grouped;
mod sheet;
mod source;
mod tabular;

#[cfg(test)]
mod tests;

pub use cache::{CatalogCache, DEFAULT_CATALOG_TTL};
pub use cell::Cell;
pub use error::CatalogError;
pub use grouped::{SectionRow, classify, classify_rows, emit_records, parse_grouped};
pub use sheet::{SheetRow, number_rows};
pub use source::{
    CatalogLayout, CatalogSource, CsvCatalog, DEFAULT_SHEET, StaticCatalog, XlsxCatalog,
};
pub use tabular::parse_tabular;
