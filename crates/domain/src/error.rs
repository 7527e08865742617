// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{PositionKey, QuotaKind};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Zone label is empty or invalid.
    InvalidZone(String),
    /// Specialty label is empty or invalid.
    InvalidSpecialty(String),
    /// A flattened position key could not be split into zone and specialty.
    InvalidPositionKey(String),
    /// No catalog record exists for the position.
    PositionNotFound(PositionKey),
    /// The same position appears more than once in a catalog.
    DuplicatePosition(PositionKey),
    /// A claimed value is negative.
    NegativeClaim {
        /// The category of the offending value.
        kind: QuotaKind,
        /// The rejected value.
        value: i64,
    },
    /// A claimed value exceeds the catalog total for its category.
    ClaimExceedsTotal {
        /// The category of the offending value.
        kind: QuotaKind,
        /// The rejected value.
        claimed: i64,
        /// The catalog total for the category.
        total: u32,
    },
    /// A quota filter name is not recognized.
    InvalidQuotaFilter(String),
    /// The event day is outside the permitted range.
    EventDayOutOfRange {
        /// The rejected day.
        day: i64,
        /// The highest permitted day.
        max: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidZone(msg) => write!(f, "Invalid zone: {msg}"),
            Self::InvalidSpecialty(msg) => write!(f, "Invalid specialty: {msg}"),
            Self::InvalidPositionKey(key) => write!(f, "Invalid position key: '{key}'"),
            Self::PositionNotFound(key) => write!(
                f,
                "No position '{}' exists in zone '{}'",
                key.specialty, key.zone
            ),
            Self::DuplicatePosition(key) => write!(
                f,
                "Position '{}' appears more than once in zone '{}'",
                key.specialty, key.zone
            ),
            Self::NegativeClaim { kind, value } => write!(
                f,
                "{} must not be negative, got {value}",
                kind.claimed_field()
            ),
            Self::ClaimExceedsTotal {
                kind,
                claimed,
                total,
            } => write!(
                f,
                "{} must be between 0 and {total}, got {claimed}",
                kind.claimed_field()
            ),
            Self::InvalidQuotaFilter(value) => write!(
                f,
                "Invalid quota filter '{value}' (must be both, permanent or interim)"
            ),
            Self::EventDayOutOfRange { day, max } => {
                write!(f, "Event day must be between 1 and {max}, got {day}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
