// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_core::{
    Playlist,
    util::clock::{TimestampSecs, UtcDateTimeSecs},
};
use setlist_repo::playlist::{PlaylistChanges, RecordHeader};

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = playlist, check_for_backend(DbBackend))]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_at: TimestampSecs,
    pub(crate) row_updated_at: TimestampSecs,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) public: bool,
}

impl From<QueryableRecord> for (RecordHeader, Playlist) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id,
            row_created_at,
            row_updated_at,
            name,
            description,
            public,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: UtcDateTimeSecs::from_unix_timestamp_secs(row_created_at),
            updated_at: UtcDateTimeSecs::from_unix_timestamp_secs(row_updated_at),
        };
        let playlist = Playlist {
            name,
            description,
            public,
        };
        (header, playlist)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = playlist)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_at: TimestampSecs,
    pub(crate) row_updated_at: TimestampSecs,
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) public: bool,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeSecs, created_playlist: &'a Playlist) -> Self {
        let row_created_updated_at = created_at.unix_timestamp_secs();
        let Playlist {
            name,
            description,
            public,
        } = created_playlist;
        Self {
            row_created_at: row_created_updated_at,
            row_updated_at: row_created_updated_at,
            name,
            description: description.as_deref(),
            public: *public,
        }
    }
}

/// Columns that are `None` are not touched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = playlist)]
pub(crate) struct UpdatableRecord<'a> {
    pub(crate) row_updated_at: TimestampSecs,
    pub(crate) name: Option<&'a str>,
    pub(crate) description: Option<Option<&'a str>>,
    pub(crate) public: Option<bool>,
}

impl<'a> UpdatableRecord<'a> {
    pub(crate) fn bind(updated_at: UtcDateTimeSecs, changes: PlaylistChanges<'a>) -> Self {
        let PlaylistChanges {
            name,
            description,
            public,
        } = changes;
        Self {
            row_updated_at: updated_at.unix_timestamp_secs(),
            name,
            description,
            public,
        }
    }
}
