// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator used when a position key is flattened into a single string.
///
/// Zone and specialty labels may not contain this sequence.
pub const KEY_SEPARATOR: &str = "||";

/// Format used for human-readable event timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Checks a free-form label and returns its trimmed form.
fn normalize_label(value: &str, make_error: fn(String) -> DomainError) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(make_error(String::from("cannot be empty")));
    }
    if trimmed.contains(KEY_SEPARATOR) {
        return Err(make_error(format!(
            "'{trimmed}' must not contain '{KEY_SEPARATOR}'"
        )));
    }
    Ok(trimmed.to_string())
}

/// A geographic or administrative grouping of positions.
///
/// Labels are free-form and compared exactly after trimming surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Zone {
    name: String,
}

impl Zone {
    /// Creates a new `Zone`.
    ///
    /// # Arguments
    ///
    /// * `name` - The zone label (surrounding whitespace is trimmed)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZone` if the label is empty or contains
    /// the key separator.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_label(name, DomainError::InvalidZone)?,
        })
    }

    /// Returns the zone label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for Zone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.name
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A medical specialty naming a distinct position type within a zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Specialty {
    name: String,
}

impl Specialty {
    /// Creates a new `Specialty`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSpecialty` if the label is empty or
    /// contains the key separator.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_label(name, DomainError::InvalidSpecialty)?,
        })
    }

    /// Returns the specialty label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for Specialty {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Specialty> for String {
    fn from(specialty: Specialty) -> Self {
        specialty.name
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Identity of a position: the `(zone, specialty)` pair.
///
/// Ordering is by zone, then specialty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey {
    /// The zone.
    pub zone: Zone,
    /// The specialty within the zone.
    pub specialty: Specialty,
}

impl PositionKey {
    /// Creates a new `PositionKey`.
    #[must_use]
    pub const fn new(zone: Zone, specialty: Specialty) -> Self {
        Self { zone, specialty }
    }

    /// Builds a key from raw labels.
    ///
    /// # Errors
    ///
    /// Returns an error if either label is invalid.
    pub fn from_labels(zone: &str, specialty: &str) -> Result<Self, DomainError> {
        Ok(Self {
            zone: Zone::new(zone)?,
            specialty: Specialty::new(specialty)?,
        })
    }
}

impl std::fmt::Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.zone, self.specialty)
    }
}

impl FromStr for PositionKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (zone, specialty) = s
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| DomainError::InvalidPositionKey(s.to_string()))?;
        Self::from_labels(zone, specialty)
    }
}

/// A position record from the catalog.
///
/// Totals are staffing quotas set externally; they are immutable for the
/// lifetime of a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// The zone this position belongs to.
    pub zone: Zone,
    /// The specialty of this position.
    pub specialty: Specialty,
    /// Permanent ("definitiva") quota.
    pub permanent_total: u32,
    /// Interim ("interina") quota.
    pub interim_total: u32,
}

impl PositionRecord {
    /// Creates a new `PositionRecord`.
    #[must_use]
    pub const fn new(
        zone: Zone,
        specialty: Specialty,
        permanent_total: u32,
        interim_total: u32,
    ) -> Self {
        Self {
            zone,
            specialty,
            permanent_total,
            interim_total,
        }
    }

    /// Returns the identity of this record.
    #[must_use]
    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.zone.clone(), self.specialty.clone())
    }

    /// Returns true if this record has the given key.
    #[must_use]
    pub fn matches(&self, key: &PositionKey) -> bool {
        self.zone == key.zone && self.specialty == key.specialty
    }

    /// Returns the quota for one category.
    #[must_use]
    pub const fn total(&self, kind: QuotaKind) -> u32 {
        match kind {
            QuotaKind::Permanent => self.permanent_total,
            QuotaKind::Interim => self.interim_total,
        }
    }
}

/// Claimed counts for a single position.
///
/// A missing claim record is equivalent to `ClaimRecord::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Permanent positions already assigned.
    pub permanent_claimed: u32,
    /// Interim positions already assigned.
    pub interim_claimed: u32,
}

impl ClaimRecord {
    /// Creates a new `ClaimRecord`.
    #[must_use]
    pub const fn new(permanent_claimed: u32, interim_claimed: u32) -> Self {
        Self {
            permanent_claimed,
            interim_claimed,
        }
    }

    /// Returns the claimed count for one category.
    #[must_use]
    pub const fn claimed(&self, kind: QuotaKind) -> u32 {
        match kind {
            QuotaKind::Permanent => self.permanent_claimed,
            QuotaKind::Interim => self.interim_claimed,
        }
    }
}

/// The two quota categories of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaKind {
    /// Permanent ("definitiva") positions.
    Permanent,
    /// Interim ("interina") positions.
    Interim,
}

impl QuotaKind {
    /// Returns the field name used for the claimed count of this category.
    #[must_use]
    pub const fn claimed_field(&self) -> &'static str {
        match self {
            Self::Permanent => "permanent_claimed",
            Self::Interim => "interim_claimed",
        }
    }
}

impl std::fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permanent => f.write_str("permanent"),
            Self::Interim => f.write_str("interim"),
        }
    }
}

/// A human-readable event timestamp (`dd/mm/YYYY HH:MM:SS`).
///
/// Stored values are kept verbatim so that they round-trip exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTimestamp(String);

impl EventTimestamp {
    /// Formats a date-time in its own timezone.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self(datetime.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Returns the current time rendered in the given timezone.
    #[must_use]
    pub fn now_in(tz: chrono_tz::Tz) -> Self {
        Self::from_datetime(&chrono::Utc::now().with_timezone(&tz))
    }

    /// Wraps a previously stored timestamp string.
    #[must_use]
    pub const fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Returns the timestamp string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scalar state of the assignment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventState {
    /// The current day of the event (1-based).
    pub event_day: u32,
    /// When claims were last recorded, if ever.
    pub last_updated: Option<EventTimestamp>,
}

impl EventState {
    /// Creates a new `EventState`.
    #[must_use]
    pub const fn new(event_day: u32, last_updated: Option<EventTimestamp>) -> Self {
        Self {
            event_day,
            last_updated,
        }
    }
}

impl Default for EventState {
    fn default() -> Self {
        Self::new(1, None)
    }
}

/// Bounds applied to event-day updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDayBounds {
    /// The highest permitted event day.
    pub max_event_day: u32,
}

impl EventDayBounds {
    /// Default upper bound of the event day counter.
    pub const DEFAULT_MAX_EVENT_DAY: u32 = 10;

    /// Creates bounds with the given upper limit.
    #[must_use]
    pub const fn new(max_event_day: u32) -> Self {
        Self { max_event_day }
    }
}

impl Default for EventDayBounds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_EVENT_DAY)
    }
}
