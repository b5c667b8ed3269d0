// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use setlist_core::{
    Track,
    util::clock::{TimestampSecs, UtcDateTimeSecs},
};
use setlist_repo::track::RecordHeader;

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = track, check_for_backend(DbBackend))]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_at: TimestampSecs,
    pub(crate) row_updated_at: TimestampSecs,
    pub(crate) title: String,
    pub(crate) artist: Option<String>,
    pub(crate) album: Option<String>,
    pub(crate) duration_ms: Option<i64>,
}

impl From<QueryableRecord> for (RecordHeader, Track) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id,
            row_created_at,
            row_updated_at,
            title,
            artist,
            album,
            duration_ms,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: UtcDateTimeSecs::from_unix_timestamp_secs(row_created_at),
            updated_at: UtcDateTimeSecs::from_unix_timestamp_secs(row_updated_at),
        };
        let track = Track {
            title,
            artist,
            album,
            duration: duration_ms.map(duration_from_millis),
        };
        (header, track)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = track)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_at: TimestampSecs,
    pub(crate) row_updated_at: TimestampSecs,
    pub(crate) title: &'a str,
    pub(crate) artist: Option<&'a str>,
    pub(crate) album: Option<&'a str>,
    pub(crate) duration_ms: Option<i64>,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeSecs, created_track: &'a Track) -> Self {
        let row_created_updated_at = created_at.unix_timestamp_secs();
        let Track {
            title,
            artist,
            album,
            duration,
        } = created_track;
        Self {
            row_created_at: row_created_updated_at,
            row_updated_at: row_created_updated_at,
            title,
            artist: artist.as_deref(),
            album: album.as_deref(),
            duration_ms: duration.map(duration_to_millis),
        }
    }
}

pub(crate) fn duration_to_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Negative values are treated as 0.
pub(crate) fn duration_from_millis(duration_ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(duration_ms).unwrap_or_default())
}
