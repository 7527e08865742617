// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The source is missing or cannot be read.
    #[error("Catalog unavailable ({source_name}): {reason}")]
    Unavailable {
        /// Path or name of the source.
        source_name: String,
        /// Underlying cause.
        reason: String,
    },
    /// A row cannot be parsed into a position record.
    #[error("Catalog format error at row {row}: {reason}")]
    Format {
        /// 1-based row number within the sheet, header included.
        row: usize,
        /// What is wrong with the row.
        reason: String,
    },
    /// The sheet as a whole has the wrong shape.
    #[error("Catalog format error: {reason}")]
    Layout {
        /// What is wrong with the sheet.
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn format(row: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            row,
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the source's content rather than its availability.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::Layout { .. })
    }
}
