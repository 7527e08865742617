// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use calamine::Data;
use num_traits::ToPrimitive;

/// A single sheet cell, reduced to what the catalog grammar cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Nothing in the cell (or whitespace only).
    Empty,
    /// Free text, trimmed.
    Text(String),
    /// A numeric cell from a spreadsheet.
    Number(f64),
}

impl Cell {
    /// Builds a cell from delimited-text input.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    /// Builds a cell from a calamine value.
    #[must_use]
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::from_text(s),
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => i.to_f64().map_or(Self::Empty, Self::Number),
            Data::Bool(b) => Self::Text(b.to_string()),
            Data::DateTime(dt) => Self::Text(dt.to_string()),
        }
    }

    /// Returns true if the cell holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the trimmed text of the cell, if any.
    ///
    /// Numeric cells are rendered so that a zone named `2` survives a
    /// spreadsheet round-trip as `"2"`.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(integral(*n).map_or_else(|| n.to_string(), |i| i.to_string())),
        }
    }

    /// Reads the cell as a non-negative quota.
    ///
    /// Empty cells count as zero; integral floats (`3.0`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the cell is not a
    /// non-negative whole number.
    pub fn count(&self) -> Result<u32, String> {
        match self {
            Self::Empty => Ok(0),
            Self::Number(n) => to_count(*n).ok_or_else(|| format!("'{n}' is not a valid count")),
            Self::Text(s) => s
                .parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(to_count))
                .ok_or_else(|| format!("'{s}' is not a valid count")),
        }
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && (value - value.trunc()).abs() < f64::EPSILON {
        value.to_i64()
    } else {
        None
    }
}

fn to_count(value: f64) -> Option<u32> {
    integral(value).and_then(|i| i.to_u32())
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Reads a cell by index, treating missing trailing cells as empty.
#[must_use]
pub fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY_CELL)
}
