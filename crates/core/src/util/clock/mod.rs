// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use jiff::Timestamp;

pub type TimestampSecs = i64;

/// An _UTC_ timestamp with truncated second precision.
///
/// Playlists record when they have been created and last modified
/// with a resolution of whole seconds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UtcDateTimeSecs {
    unix_timestamp_secs: TimestampSecs,
}

impl UtcDateTimeSecs {
    #[must_use]
    pub const fn from_unix_timestamp_secs(unix_timestamp_secs: TimestampSecs) -> Self {
        Self {
            unix_timestamp_secs,
        }
    }

    #[must_use]
    pub const fn unix_timestamp_secs(&self) -> TimestampSecs {
        self.unix_timestamp_secs
    }

    /// Truncates sub-second precision.
    #[must_use]
    pub fn from_timestamp(timestamp: &Timestamp) -> Self {
        Self::from_unix_timestamp_secs(timestamp.as_second())
    }

    /// `None` if out of the range supported by [`Timestamp`].
    #[must_use]
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.unix_timestamp_secs).ok()
    }

    #[must_use]
    pub fn now() -> Self {
        Self::from_timestamp(&Timestamp::now())
    }
}

impl From<Timestamp> for UtcDateTimeSecs {
    fn from(from: Timestamp) -> Self {
        Self::from_timestamp(&from)
    }
}

impl fmt::Display for UtcDateTimeSecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(timestamp) = self.to_timestamp() {
            return fmt::Display::fmt(&timestamp, f);
        }
        write!(f, "@{}", self.unix_timestamp_secs)
    }
}
