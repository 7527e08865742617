// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use plazas_domain::PositionKey;

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes. Claimed values and
/// the event day arrive unvalidated (possibly negative) and are checked when
/// the command is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record the claimed counts of one position.
    RecordClaim {
        /// The position being updated.
        key: PositionKey,
        /// New permanent claimed count.
        permanent_claimed: i64,
        /// New interim claimed count.
        interim_claimed: i64,
    },
    /// Move the event to another day.
    SetEventDay {
        /// The new event day.
        day: i64,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RecordClaim { .. } => "RecordClaim",
            Self::SetEventDay { .. } => "SetEventDay",
        }
    }
}
